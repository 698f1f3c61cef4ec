//! Read-only views over committed snapshots.
//!
//! A view loads its snapshot once when it is built and never observes later
//! commits on its own. [`PortfolioView::is_stale`] and
//! [`ServicesView::is_stale`] compare the revision captured at load time
//! with the store's current one; `refresh` rebuilds the view in place.

use std::collections::HashMap;

use crate::content::{Entity, EntityKind, PortfolioItem, ServiceCategory};
use crate::error::Result;
use crate::storage::{Revision, SlotBackend};
use crate::store::ContentStore;

/// Category label that matches every item.
pub const ALL_CATEGORIES: &str = "All";

/// Message shown in place of the services grid when there are none.
pub const NO_SERVICES_MESSAGE: &str = "No services available";

/// Message shown in place of a carousel image when a service has none.
pub const NO_IMAGES_MESSAGE: &str = "No images available";

/// Distinct categories in first-seen order, with [`ALL_CATEGORIES`] first.
#[must_use]
pub fn categories(items: &[PortfolioItem]) -> Vec<String> {
    let mut labels = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !labels.iter().any(|label| *label == item.category) {
            labels.push(item.category.clone());
        }
    }
    labels
}

/// Items matching `label` exactly, in their original order.
///
/// [`ALL_CATEGORIES`] matches everything.
#[must_use]
pub fn filter_by_category<'a>(items: &'a [PortfolioItem], label: &str) -> Vec<&'a PortfolioItem> {
    if label == ALL_CATEGORIES {
        return items.iter().collect();
    }
    items.iter().filter(|item| item.category == label).collect()
}

fn is_stale<B: SlotBackend>(
    store: &ContentStore<B>,
    kind: EntityKind,
    seen: &Revision,
) -> Result<bool> {
    Ok(store.revision(kind)?.as_ref() != Some(seen))
}

/// The portfolio gallery with its category filter.
#[derive(Debug, Clone)]
pub struct PortfolioView {
    items: Vec<PortfolioItem>,
    categories: Vec<String>,
    selected: String,
    revision: Revision,
}

impl PortfolioView {
    /// Build the view from the store's current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: SlotBackend>(store: &ContentStore<B>) -> Result<Self> {
        let snapshot = store.load_snapshot::<PortfolioItem>()?;
        Ok(Self {
            categories: categories(&snapshot.items),
            items: snapshot.items,
            selected: ALL_CATEGORIES.to_string(),
            revision: snapshot.revision,
        })
    }

    /// Every loaded item.
    #[must_use]
    pub fn items(&self) -> &[PortfolioItem] {
        &self.items
    }

    /// Filter labels, `"All"` first.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The selected filter label.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Change the selected filter label.
    pub fn select(&mut self, label: impl Into<String>) {
        self.selected = label.into();
    }

    /// Items for an arbitrary label.
    #[must_use]
    pub fn filter(&self, label: &str) -> Vec<&PortfolioItem> {
        filter_by_category(&self.items, label)
    }

    /// Items for the selected label.
    #[must_use]
    pub fn visible(&self) -> Vec<&PortfolioItem> {
        self.filter(&self.selected)
    }

    /// Revision the view was loaded at.
    #[must_use]
    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    /// Whether the store has been committed to since this view loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_stale<B: SlotBackend>(&self, store: &ContentStore<B>) -> Result<bool> {
        is_stale(store, EntityKind::Portfolio, &self.revision)
    }

    /// Reload from the store, keeping the selection if it still exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn refresh<B: SlotBackend>(&mut self, store: &ContentStore<B>) -> Result<()> {
        let selected = std::mem::take(&mut self.selected);
        *self = Self::load(store)?;
        if self.categories.contains(&selected) {
            self.selected = selected;
        }
        Ok(())
    }
}

/// What a carousel shows for one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselFrame<'a> {
    /// An image and its zero-based position.
    Image {
        /// Image URL.
        url: &'a str,
        /// Cursor position.
        index: usize,
        /// Number of images.
        total: usize,
    },
    /// The service has no images.
    Placeholder,
}

impl std::fmt::Display for CarouselFrame<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image { url, index, total } => write!(f, "[{}/{total}] {url}", index + 1),
            Self::Placeholder => f.write_str(NO_IMAGES_MESSAGE),
        }
    }
}

/// The services section with a per-service image carousel.
#[derive(Debug, Clone)]
pub struct ServicesView {
    services: Vec<ServiceCategory>,
    cursors: HashMap<String, usize>,
    revision: Revision,
}

impl ServicesView {
    /// Build the view from the store's current snapshot, all cursors at 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: SlotBackend>(store: &ContentStore<B>) -> Result<Self> {
        let snapshot = store.load_snapshot::<ServiceCategory>()?;
        let cursors = snapshot
            .items
            .iter()
            .map(|service| (service.id.clone(), 0))
            .collect();
        Ok(Self {
            services: snapshot.items,
            cursors,
            revision: snapshot.revision,
        })
    }

    /// Every loaded service.
    #[must_use]
    pub fn services(&self) -> &[ServiceCategory] {
        &self.services
    }

    /// Whether there is nothing to show (the empty state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Current cursor for a service, `None` for unknown ids.
    #[must_use]
    pub fn cursor(&self, id: &str) -> Option<usize> {
        self.cursors.get(id).copied()
    }

    /// Advance a service's cursor, wrapping at the end.
    ///
    /// Returns the new cursor, or `None` if the service is unknown or has no images.
    pub fn next(&mut self, id: &str) -> Option<usize> {
        self.step(id, |cursor, len| (cursor + 1) % len)
    }

    /// Move a service's cursor back, wrapping at the start.
    ///
    /// Returns the new cursor, or `None` if the service is unknown or has no images.
    pub fn previous(&mut self, id: &str) -> Option<usize> {
        self.step(id, |cursor, len| if cursor == 0 { len - 1 } else { cursor - 1 })
    }

    /// Move a service's cursor by `steps`, negative going back, wrapping both ways.
    ///
    /// Costs the same for any step count. Returns the new cursor, or `None`
    /// if the service is unknown or has no images.
    pub fn advance(&mut self, id: &str, steps: i64) -> Option<usize> {
        self.step(id, |cursor, len| {
            let offset = i64::try_from(len)
                .ok()
                .and_then(|len| usize::try_from(steps.rem_euclid(len)).ok())
                .unwrap_or(0);
            (cursor + offset) % len
        })
    }

    /// URL of the image under a service's cursor.
    #[must_use]
    pub fn current_image(&self, id: &str) -> Option<&str> {
        match self.frame(id)? {
            CarouselFrame::Image { url, .. } => Some(url),
            CarouselFrame::Placeholder => None,
        }
    }

    /// What the carousel for a service shows, `None` for unknown ids.
    #[must_use]
    pub fn frame(&self, id: &str) -> Option<CarouselFrame<'_>> {
        let service = self.find(id)?;
        let index = self.cursor(id).unwrap_or(0);
        Some(match service.images.get(index) {
            Some(url) => CarouselFrame::Image {
                url,
                index,
                total: service.images.len(),
            },
            None => CarouselFrame::Placeholder,
        })
    }

    /// Revision the view was loaded at.
    #[must_use]
    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    /// Whether the store has been committed to since this view loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_stale<B: SlotBackend>(&self, store: &ContentStore<B>) -> Result<bool> {
        is_stale(store, EntityKind::Services, &self.revision)
    }

    /// Reload from the store.
    ///
    /// Cursors of surviving services are kept and clamped to their new image
    /// count; cursors of removed services are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn refresh<B: SlotBackend>(&mut self, store: &ContentStore<B>) -> Result<()> {
        let previous = std::mem::take(&mut self.cursors);
        *self = Self::load(store)?;
        for service in &self.services {
            if let Some(&cursor) = previous.get(service.id()) {
                let clamped = cursor.min(service.images.len().saturating_sub(1));
                self.cursors.insert(service.id.clone(), clamped);
            }
        }
        Ok(())
    }

    fn find(&self, id: &str) -> Option<&ServiceCategory> {
        self.services.iter().find(|service| service.id == id)
    }

    fn step(&mut self, id: &str, advance: impl Fn(usize, usize) -> usize) -> Option<usize> {
        let len = self.find(id)?.images.len();
        if len == 0 {
            return None;
        }
        let cursor = self.cursors.entry(id.to_string()).or_insert(0);
        *cursor = advance(*cursor, len);
        Some(*cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn create_test_store() -> ContentStore<Storage> {
        ContentStore::new(Storage::open_in_memory().expect("failed to create test storage"))
    }

    fn item(id: &str, title: &str, category: &str) -> PortfolioItem {
        let mut item = PortfolioItem::new(title, "d", "https://img.example/i.jpg", category);
        item.id = id.to_string();
        item
    }

    fn service(id: &str, images: &[&str]) -> ServiceCategory {
        let mut service = ServiceCategory::new(format!("Service {id}"), "d").with_images(images);
        service.id = id.to_string();
        service
    }

    #[test]
    fn test_categories_first_seen_order() {
        let items = vec![
            item("1", "a", "Print"),
            item("2", "b", "Branding"),
            item("3", "c", "Print"),
            item("4", "d", "branding"),
        ];
        assert_eq!(
            categories(&items),
            vec!["All", "Print", "Branding", "branding"]
        );
    }

    #[test]
    fn test_categories_of_empty_list() {
        assert_eq!(categories(&[]), vec!["All"]);
    }

    #[test]
    fn test_filter_all_returns_everything_in_order() {
        let items = vec![item("1", "a", "X"), item("2", "b", "Y")];
        let filtered = filter_by_category(&items, ALL_CATEGORIES);
        assert_eq!(filtered, items.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_filter_is_exact_and_ordered() {
        let items = vec![
            item("1", "a", "Print"),
            item("2", "b", "Web"),
            item("3", "c", "Print"),
            item("4", "d", "print"),
        ];
        let titles: Vec<_> = filter_by_category(&items, "Print")
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert!(filter_by_category(&items, "Nope").is_empty());
    }

    #[test]
    fn test_portfolio_view_selection() {
        let store = create_test_store();
        let mut view = PortfolioView::load(&store).unwrap();

        assert_eq!(view.selected(), ALL_CATEGORIES);
        assert_eq!(view.visible().len(), 2);
        assert_eq!(view.categories(), ["All", "Branding", "Social Media"]);

        view.select("Branding");
        let visible = view.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Brand Identity Design");
    }

    #[test]
    fn test_portfolio_view_goes_stale_and_refreshes() {
        let store = create_test_store();
        let mut view = PortfolioView::load(&store).unwrap();
        view.select("Social Media");
        assert!(!view.is_stale(&store).unwrap());

        store
            .upsert(PortfolioItem::new("Test", "d", "https://img.example/t.jpg", "Print"))
            .unwrap();
        assert!(view.is_stale(&store).unwrap());
        assert_eq!(view.items().len(), 2);

        view.refresh(&store).unwrap();
        assert!(!view.is_stale(&store).unwrap());
        assert_eq!(view.items().len(), 3);
        assert!(view.categories().contains(&"Print".to_string()));
        assert_eq!(view.selected(), "Social Media");
    }

    #[test]
    fn test_portfolio_refresh_resets_vanished_selection() {
        let store = create_test_store();
        let mut view = PortfolioView::load(&store).unwrap();
        view.select("Social Media");

        store.remove::<PortfolioItem>("2").unwrap();
        view.refresh(&store).unwrap();
        assert_eq!(view.selected(), ALL_CATEGORIES);
    }

    #[test]
    fn test_cursor_wraps_forward() {
        let store = create_test_store();
        store.commit(&[service("s", &["a", "b", "c"])]).unwrap();
        let mut view = ServicesView::load(&store).unwrap();

        assert_eq!(view.cursor("s"), Some(0));
        for _ in 0..3 {
            view.next("s");
        }
        assert_eq!(view.cursor("s"), Some(0));
    }

    #[test]
    fn test_advance_matches_repeated_steps() {
        let store = create_test_store();
        store.commit(&[service("s", &["a", "b", "c"])]).unwrap();
        let mut view = ServicesView::load(&store).unwrap();

        assert_eq!(view.advance("s", 4), Some(1));
        assert_eq!(view.advance("s", -2), Some(2));
        assert_eq!(view.advance("s", 0), Some(2));
        assert_eq!(view.advance("s", 3), Some(2));
    }

    #[test]
    fn test_advance_huge_step_counts() {
        let store = create_test_store();
        store.commit(&[service("s", &["a", "b", "c"])]).unwrap();
        let mut view = ServicesView::load(&store).unwrap();

        // i64::MAX % 3 == 1, i64::MIN.rem_euclid(3) == 1
        assert_eq!(view.advance("s", i64::MAX), Some(1));
        assert_eq!(view.advance("s", i64::MIN), Some(2));
        assert_eq!(view.advance("bare", 5), None);
    }

    #[test]
    fn test_previous_from_zero_wraps_to_last() {
        let store = create_test_store();
        store.commit(&[service("s", &["a", "b", "c"])]).unwrap();
        let mut view = ServicesView::load(&store).unwrap();

        assert_eq!(view.previous("s"), Some(2));
        assert_eq!(view.current_image("s"), Some("c"));
    }

    #[test]
    fn test_cursor_without_images_shows_placeholder() {
        let store = create_test_store();
        store.commit(&[service("bare", &[])]).unwrap();
        let mut view = ServicesView::load(&store).unwrap();

        assert_eq!(view.next("bare"), None);
        assert_eq!(view.previous("bare"), None);
        assert_eq!(view.current_image("bare"), None);
        assert_eq!(view.frame("bare"), Some(CarouselFrame::Placeholder));
        assert_eq!(
            view.frame("bare").unwrap().to_string(),
            NO_IMAGES_MESSAGE
        );
    }

    #[test]
    fn test_unknown_service_is_ignored() {
        let store = create_test_store();
        let mut view = ServicesView::load(&store).unwrap();
        assert_eq!(view.next("nope"), None);
        assert_eq!(view.cursor("nope"), None);
        assert!(view.frame("nope").is_none());
    }

    #[test]
    fn test_cursors_are_independent() {
        let store = create_test_store();
        let mut view = ServicesView::load(&store).unwrap();

        assert_eq!(view.next("1"), Some(1));
        assert_eq!(view.cursor("2"), Some(0));
        assert_eq!(view.next("2"), Some(0));
    }

    #[test]
    fn test_frame_display() {
        let frame = CarouselFrame::Image {
            url: "https://img.example/a.jpg",
            index: 1,
            total: 3,
        };
        assert_eq!(frame.to_string(), "[2/3] https://img.example/a.jpg");
    }

    #[test]
    fn test_refresh_clamps_and_drops_cursors() {
        let store = create_test_store();
        store
            .commit(&[service("a", &["1", "2", "3"]), service("b", &["x", "y"])])
            .unwrap();
        let mut view = ServicesView::load(&store).unwrap();
        view.previous("a");
        view.next("b");

        store.commit(&[service("a", &["1"])]).unwrap();
        view.refresh(&store).unwrap();

        assert_eq!(view.cursor("a"), Some(0));
        assert_eq!(view.cursor("b"), None);
        assert_eq!(view.current_image("a"), Some("1"));
    }

    #[test]
    fn test_deleting_only_service_empties_view() {
        let store = create_test_store();
        store.commit(&[service("1", &["a"])]).unwrap();

        store.remove::<ServiceCategory>("1").unwrap();
        let view = ServicesView::load(&store).unwrap();
        assert!(view.is_empty());
    }
}
