//! Service categories shown in the services carousel.

use serde::{Deserialize, Serialize};

use super::{
    blank_fields, push_unique, remove_exact, seed, tidy_list, trim_in_place, Entity, EntityKind,
};

/// A service offering with a set of example images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategory {
    /// Unique identifier, empty until the category is first committed.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description.
    pub description: String,

    /// Example image URLs, unique within the category.
    #[serde(default)]
    pub images: Vec<String>,
}

impl ServiceCategory {
    /// Create a new, uncommitted category with no images.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            images: Vec::new(),
        }
    }

    /// Builder-style helper to attach images.
    #[must_use]
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for image in images {
            self.add_image(image.as_ref());
        }
        self
    }

    /// Add an image URL after trimming; blank and duplicate URLs are ignored.
    pub fn add_image(&mut self, url: &str) -> bool {
        push_unique(&mut self.images, url)
    }

    /// Remove an image URL by exact match.
    pub fn remove_image(&mut self, url: &str) -> bool {
        remove_exact(&mut self.images, url)
    }
}

impl Entity for ServiceCategory {
    const KIND: EntityKind = EntityKind::Services;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        seed::services_seed()
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields([
            ("name", self.name.as_str()),
            ("description", self.description.as_str()),
        ])
    }

    fn image_urls(&self) -> Vec<&str> {
        self.images.iter().map(String::as_str).collect()
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.description);
        tidy_list(&mut self.images);
    }
}
