//! Built-in seed content written to empty slots.

use super::{PortfolioItem, ServiceCategory};

const BRAND_IMAGE: &str = "https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=600&q=80";
const SOCIAL_IMAGE: &str =
    "https://images.unsplash.com/photo-1611162617474-5b21e879e113?w=600&q=80";
const LOGO_IMAGE: &str = "https://images.unsplash.com/photo-1626785774573-4b799315345d?w=600&q=80";
const WEB_IMAGE: &str = "https://images.unsplash.com/photo-1547658719-da2b51169166?w=600&q=80";

fn seeded_item(
    id: &str,
    title: &str,
    description: &str,
    image: &str,
    category: &str,
    tags: &[&str],
) -> PortfolioItem {
    let mut item = PortfolioItem::new(title, description, image, category).with_tags(tags);
    item.id = id.to_string();
    item
}

/// The default portfolio items.
#[must_use]
pub fn portfolio_seed() -> Vec<PortfolioItem> {
    vec![
        seeded_item(
            "1",
            "Brand Identity Design",
            "Complete brand identity package for a tech startup",
            BRAND_IMAGE,
            "Branding",
            &["Branding", "Logo", "Identity"],
        ),
        seeded_item(
            "2",
            "Social Media Campaign",
            "Instagram campaign design for fashion brand",
            SOCIAL_IMAGE,
            "Social Media",
            &["Social Media", "Instagram", "Fashion"],
        ),
    ]
}

/// The default service categories.
#[must_use]
pub fn services_seed() -> Vec<ServiceCategory> {
    let mut logo = ServiceCategory::new("Logo Design", "Professional logo design services")
        .with_images([LOGO_IMAGE, BRAND_IMAGE]);
    logo.id = "1".to_string();

    let mut web = ServiceCategory::new("Web Design", "Modern website design and development")
        .with_images([WEB_IMAGE]);
    web.id = "2".to_string();

    vec![logo, web]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Entity;

    #[test]
    fn test_portfolio_seed_shape() {
        let seed = portfolio_seed();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].id, "1");
        assert_eq!(seed[1].category, "Social Media");
        assert!(seed.iter().all(|item| item.missing_fields().is_empty()));
    }

    #[test]
    fn test_services_seed_shape() {
        let seed = services_seed();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].images.len(), 2);
        assert_eq!(seed[1].images.len(), 1);
    }
}
