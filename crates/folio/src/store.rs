//! The content store.
//!
//! [`ContentStore`] keeps one snapshot per entity kind in a [`SlotBackend`]
//! slot. Every mutation rewrites the whole snapshot; there is no partial
//! update path. Successful commits are announced on a broadcast channel so
//! readers that care can notice they are stale.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::content::{Entity, EntityKind, IdGenerator, PortfolioItem, ServiceCategory};
use crate::error::{Error, Result};
use crate::storage::{Revision, SlotBackend};

/// Capacity of the change notification channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Announcement of a committed snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Which snapshot changed.
    pub kind: EntityKind,
    /// Revision of the new snapshot.
    pub revision: Revision,
    /// Number of entities in the new snapshot.
    pub len: usize,
}

/// A loaded list together with the revision it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<E> {
    /// The entities, in insertion order.
    pub items: Vec<E>,
    /// Revision of the slot the items were read from.
    pub revision: Revision,
}

/// Counts shown on the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    /// Number of portfolio items.
    pub portfolio_items: usize,
    /// Number of service categories.
    pub service_categories: usize,
    /// Number of images across all service categories.
    pub total_images: usize,
}

/// Persistent per-kind entity lists with seeding on first use.
#[derive(Debug)]
pub struct ContentStore<B> {
    backend: B,
    ids: IdGenerator,
    changes: broadcast::Sender<ChangeEvent>,
}

impl<B: SlotBackend> ContentStore<B> {
    /// Wrap a slot backend.
    pub fn new(backend: B) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            backend,
            ids: IdGenerator::new(),
            changes,
        }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Subscribe to commit notifications.
    ///
    /// Only commits made after subscribing are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }

    /// Load the current list for `E`.
    ///
    /// An absent or unparseable slot is replaced by the seed list, which is
    /// committed and returned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails.
    pub fn load<E: Entity>(&self) -> Result<Vec<E>> {
        Ok(self.load_snapshot()?.items)
    }

    /// Load the current list for `E` along with its revision.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails.
    pub fn load_snapshot<E: Entity>(&self) -> Result<Snapshot<E>> {
        let slot_name = E::KIND.slot_name();
        match self.backend.read_slot(slot_name)? {
            Some(slot) => match serde_json::from_str::<Vec<E>>(&slot.payload) {
                Ok(items) => Ok(Snapshot {
                    items,
                    revision: slot.revision,
                }),
                Err(e) => {
                    warn!(
                        slot = slot_name,
                        error = %e,
                        "Stored snapshot is malformed, falling back to seed data"
                    );
                    self.seed_slot()
                }
            },
            None => {
                debug!(slot = slot_name, "Slot is empty, writing seed data");
                self.seed_slot()
            }
        }
    }

    /// Overwrite the slot for `E` with `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn commit<E: Entity>(&self, items: &[E]) -> Result<Revision> {
        let payload = serde_json::to_string(items)?;
        let slot = self.backend.write_slot(E::KIND.slot_name(), &payload)?;

        info!(
            kind = %E::KIND,
            len = items.len(),
            revision = slot.revision.short(),
            "Committed snapshot"
        );
        // No receivers is fine; nobody is watching.
        let _ = self.changes.send(ChangeEvent {
            kind: E::KIND,
            revision: slot.revision.clone(),
            len: items.len(),
        });
        Ok(slot.revision)
    }

    /// Insert a new entity or replace an existing one.
    ///
    /// An entity with an empty id is appended under a fresh id. An entity
    /// with an id replaces the entry with that id in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntityNotFound`] if the id is non-empty and matches
    /// no entry; nothing is committed in that case.
    pub fn upsert<E: Entity>(&self, mut entity: E) -> Result<Vec<E>> {
        let mut items = self.load::<E>()?;

        if entity.is_new() {
            let id = self.ids.next_id(items.iter().map(Entity::id));
            debug!(kind = %E::KIND, id = %id, "Assigned id to new entity");
            entity.set_id(id);
            items.push(entity);
        } else {
            let slot = items
                .iter_mut()
                .find(|existing| existing.id() == entity.id())
                .ok_or_else(|| Error::not_found(E::KIND, entity.id()))?;
            *slot = entity;
        }

        self.commit(&items)?;
        Ok(items)
    }

    /// Remove the entity with `id`.
    ///
    /// Removing an absent id leaves the list unchanged and commits nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or committing fails.
    pub fn remove<E: Entity>(&self, id: &str) -> Result<Vec<E>> {
        let mut items = self.load::<E>()?;
        let before = items.len();
        items.retain(|item| item.id() != id);

        if items.len() == before {
            debug!(kind = %E::KIND, id, "Remove of unknown id ignored");
            return Ok(items);
        }

        self.commit(&items)?;
        Ok(items)
    }

    /// Find one entity by id.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub fn get<E: Entity>(&self, id: &str) -> Result<Option<E>> {
        Ok(self
            .load::<E>()?
            .into_iter()
            .find(|item| item.id() == id))
    }

    /// Replace the slot for `E` with the seed list.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub fn reseed<E: Entity>(&self) -> Result<Vec<E>> {
        info!(kind = %E::KIND, "Reseeding snapshot");
        Ok(self.seed_slot::<E>()?.items)
    }

    /// Current revision of the slot for `kind`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn revision(&self, kind: EntityKind) -> Result<Option<Revision>> {
        Ok(self
            .backend
            .read_slot(kind.slot_name())?
            .map(|slot| slot.revision))
    }

    /// Count entities across both kinds.
    ///
    /// # Errors
    ///
    /// Returns an error if loading either list fails.
    pub fn stats(&self) -> Result<ContentStats> {
        let portfolio = self.load::<PortfolioItem>()?;
        let services = self.load::<ServiceCategory>()?;
        Ok(ContentStats {
            portfolio_items: portfolio.len(),
            service_categories: services.len(),
            total_images: services.iter().map(|s| s.images.len()).sum(),
        })
    }

    fn seed_slot<E: Entity>(&self) -> Result<Snapshot<E>> {
        let items = E::seed();
        let revision = self.commit(&items)?;
        Ok(Snapshot { items, revision })
    }
}
