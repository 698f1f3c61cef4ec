//! Core content types for folio.
//!
//! This module defines the two entity kinds the store manages, portfolio
//! items and service categories, along with the [`Entity`] trait that lets
//! the store, readers and forms treat both uniformly.

mod id;
mod portfolio;
mod seed;
mod service;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use id::IdGenerator;
pub use portfolio::PortfolioItem;
pub use seed::{portfolio_seed, services_seed};
pub use service::ServiceCategory;

/// The kind of entity a snapshot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Portfolio gallery items.
    Portfolio,
    /// Service categories shown in the services carousel.
    Services,
}

impl EntityKind {
    /// Every entity kind, in display order.
    pub const ALL: [Self; 2] = [Self::Portfolio, Self::Services];

    /// Name of the storage slot holding this kind's snapshot.
    #[must_use]
    pub fn slot_name(self) -> &'static str {
        match self {
            Self::Portfolio => "portfolioItems",
            Self::Services => "serviceCategories",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Portfolio => write!(f, "portfolio"),
            Self::Services => write!(f, "services"),
        }
    }
}

/// A record that can live in a content snapshot.
///
/// Implementors provide identity, their seed list and the per-kind rules
/// the admin forms enforce before a draft reaches the store.
pub trait Entity: Clone + std::fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    /// Which slot this entity is stored in.
    const KIND: EntityKind;

    /// The entity's id; empty for a draft that has never been committed.
    fn id(&self) -> &str;

    /// Replace the entity's id.
    fn set_id(&mut self, id: String);

    /// Default entities written when the slot is empty.
    fn seed() -> Vec<Self>;

    /// Names of required text fields that are blank, in form order.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Every image URL carried by this entity.
    fn image_urls(&self) -> Vec<&str>;

    /// Trim surrounding whitespace from text fields and list entries.
    fn normalize(&mut self);

    /// Whether this entity has been assigned an id.
    fn is_new(&self) -> bool {
        self.id().is_empty()
    }
}

/// Append a trimmed value to a list unless it is blank or already present.
///
/// Returns `true` if the list changed.
pub(crate) fn push_unique(list: &mut Vec<String>, raw: &str) -> bool {
    let value = raw.trim();
    if value.is_empty() || list.iter().any(|existing| existing == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

/// Remove every entry exactly equal to `value`.
///
/// Returns `true` if the list changed.
pub(crate) fn remove_exact(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != value);
    list.len() != before
}

/// Trim a field in place.
pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim every entry, then drop blanks and repeats, keeping first occurrences.
pub(crate) fn tidy_list(list: &mut Vec<String>) {
    let raw = std::mem::take(list);
    for value in &raw {
        push_unique(list, value);
    }
}

/// Collect the labels of blank fields.
pub(crate) fn blank_fields<'a>(
    fields: impl IntoIterator<Item = (&'static str, &'a str)>,
) -> Vec<&'static str> {
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_names() {
        assert_eq!(EntityKind::Portfolio.slot_name(), "portfolioItems");
        assert_eq!(EntityKind::Services.slot_name(), "serviceCategories");
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Portfolio.to_string(), "portfolio");
        assert_eq!(EntityKind::Services.to_string(), "services");
    }

    #[test]
    fn test_push_unique_trims_and_dedups() {
        let mut list = vec!["Logo".to_string()];
        assert!(push_unique(&mut list, "  Print "));
        assert!(!push_unique(&mut list, "Logo"));
        assert!(!push_unique(&mut list, " Logo  "));
        assert!(!push_unique(&mut list, "   "));
        assert_eq!(list, vec!["Logo", "Print"]);
    }

    #[test]
    fn test_push_unique_is_case_sensitive() {
        let mut list = vec!["logo".to_string()];
        assert!(push_unique(&mut list, "Logo"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_exact() {
        let mut list = vec!["a".to_string(), "b".to_string()];
        assert!(!remove_exact(&mut list, " a"));
        assert!(remove_exact(&mut list, "a"));
        assert_eq!(list, vec!["b"]);
    }

    #[test]
    fn test_trim_in_place() {
        let mut value = "  https://a.io/x.jpg\n".to_string();
        trim_in_place(&mut value);
        assert_eq!(value, "https://a.io/x.jpg");
    }

    #[test]
    fn test_tidy_list() {
        let mut list = vec![" a".to_string(), "a ".to_string(), " ".to_string(), "b".to_string()];
        tidy_list(&mut list);
        assert_eq!(list, vec!["a", "b"]);
    }

    #[test]
    fn test_blank_fields_keeps_order() {
        let missing = blank_fields([("title", ""), ("description", "x"), ("image", "  ")]);
        assert_eq!(missing, vec!["title", "image"]);
    }
}
