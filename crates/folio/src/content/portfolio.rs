//! Portfolio gallery items.

use serde::{Deserialize, Serialize};

use super::{
    blank_fields, push_unique, remove_exact, seed, tidy_list, trim_in_place, Entity, EntityKind,
};

/// A single piece of work shown in the portfolio gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    /// Unique identifier, empty until the item is first committed.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Short description shown under the image.
    pub description: String,

    /// Image URL.
    pub image: String,

    /// Gallery filter category (matched exactly).
    pub category: String,

    /// Informal labels, unique within the item.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PortfolioItem {
    /// Create a new, uncommitted item with no tags.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            description: description.into(),
            image: image.into(),
            category: category.into(),
            tags: Vec::new(),
        }
    }

    /// Builder-style helper to attach tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
        self
    }

    /// Add a tag after trimming; blank and duplicate tags are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        push_unique(&mut self.tags, tag)
    }

    /// Remove a tag by exact match.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        remove_exact(&mut self.tags, tag)
    }
}

impl Entity for PortfolioItem {
    const KIND: EntityKind = EntityKind::Portfolio;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        seed::portfolio_seed()
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields([
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("image", self.image.as_str()),
            ("category", self.category.as_str()),
        ])
    }

    fn image_urls(&self) -> Vec<&str> {
        vec![self.image.as_str()]
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.image);
        trim_in_place(&mut self.category);
        tidy_list(&mut self.tags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_new() {
        let item = PortfolioItem::new("T", "D", "https://img/x.jpg", "Print");
        assert!(item.is_new());
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_with_tags_dedups() {
        let item = PortfolioItem::new("T", "D", "I", "C").with_tags(["a", " a ", "b", ""]);
        assert_eq!(item.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_fields() {
        let item = PortfolioItem::new("", "D", " ", "");
        assert_eq!(item.missing_fields(), vec!["title", "image", "category"]);

        let item = PortfolioItem::new("T", "D", "I", "C");
        assert!(item.missing_fields().is_empty());
    }

    #[test]
    fn test_tags_default_when_absent() {
        let json = r#"{"id":"9","title":"T","description":"D","image":"I","category":"C"}"#;
        let item: PortfolioItem = serde_json::from_str(json).unwrap();
        assert!(item.tags.is_empty());
        assert_eq!(item.id(), "9");
    }

    #[test]
    fn test_serialized_field_names() {
        let item = PortfolioItem::new("T", "D", "I", "C").with_tags(["x"]);
        let value = serde_json::to_value(&item).unwrap();
        for field in ["id", "title", "description", "image", "category", "tags"] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn test_remove_tag() {
        let mut item = PortfolioItem::new("T", "D", "I", "C").with_tags(["x", "y"]);
        assert!(item.remove_tag("x"));
        assert!(!item.remove_tag("x"));
        assert_eq!(item.tags, vec!["y"]);
    }

    #[test]
    fn test_normalize_trims_fields_and_tags() {
        let mut item = PortfolioItem::new(" T ", "D\n", " https://img/x.jpg ", "Print ");
        item.tags = vec![" a".to_string(), "a".to_string(), "  ".to_string()];
        item.normalize();
        assert_eq!(item.title, "T");
        assert_eq!(item.description, "D");
        assert_eq!(item.image, "https://img/x.jpg");
        assert_eq!(item.category, "Print");
        assert_eq!(item.tags, vec!["a"]);
    }
}
