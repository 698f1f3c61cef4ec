//! Admin editing: drafts, forms and the modal state machine.
//!
//! A [`Form`] owns a draft copy of one entity. Field and list edits only
//! touch the draft; nothing reaches the store until [`AdminPanel::save`]
//! validates the draft and upserts it. [`AdminPanel::cancel`] drops the
//! draft without committing.

use tracing::{debug, info};

use crate::auth::{AdminSession, CredentialVerifier, Credentials};
use crate::content::{Entity, EntityKind, PortfolioItem, ServiceCategory};
use crate::error::{Error, Result};
use crate::storage::SlotBackend;
use crate::store::{ContentStats, ContentStore};
use crate::url_policy::UrlPolicy;

/// Whether a form creates a new entity or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// The draft started empty and will get a fresh id on save.
    Adding,
    /// The draft is a copy of a committed entity; its id is preserved.
    Editing,
}

/// A draft being edited.
///
/// The form remembers the id it was opened with. Whatever the draft's `id`
/// field holds when submitted, adding always creates a new entity and
/// editing always targets the original one.
#[derive(Debug, Clone, PartialEq)]
pub struct Form<E> {
    mode: FormMode,
    original_id: String,
    draft: E,
}

impl<E: Entity + Default> Form<E> {
    /// A form for a brand-new entity.
    #[must_use]
    pub fn adding() -> Self {
        Self {
            mode: FormMode::Adding,
            original_id: String::new(),
            draft: E::default(),
        }
    }
}

impl<E: Entity> Form<E> {
    /// A form editing a copy of `entity`.
    #[must_use]
    pub fn editing(entity: E) -> Self {
        Self {
            mode: FormMode::Editing,
            original_id: entity.id().to_string(),
            draft: entity,
        }
    }

    /// Whether this form adds or edits.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The id of the entity being edited; empty when adding.
    #[must_use]
    pub fn original_id(&self) -> &str {
        &self.original_id
    }

    /// The current draft.
    #[must_use]
    pub fn draft(&self) -> &E {
        &self.draft
    }

    /// Mutable access to the draft's fields.
    pub fn draft_mut(&mut self) -> &mut E {
        &mut self.draft
    }

    /// Check required fields, then image URLs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] listing every blank required field, or
    /// the policy's rejection of the first bad image URL.
    pub fn validate(&self, policy: &UrlPolicy) -> Result<()> {
        self.submission(policy).map(|_| ())
    }

    /// The entity this form would commit: trimmed, validated, and carrying
    /// the id its mode calls for.
    ///
    /// # Errors
    ///
    /// Same as [`Form::validate`].
    pub fn submission(&self, policy: &UrlPolicy) -> Result<E> {
        let mut entity = self.draft.clone();
        entity.normalize();

        let fields = entity.missing_fields();
        if !fields.is_empty() {
            return Err(Error::Validation { fields });
        }
        policy.check_all(entity.image_urls())?;

        match self.mode {
            FormMode::Adding => entity.set_id(String::new()),
            FormMode::Editing => entity.set_id(self.original_id.clone()),
        }
        Ok(entity)
    }
}

impl Form<PortfolioItem> {
    /// Add a tag to the draft.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        self.draft.add_tag(tag)
    }

    /// Remove a tag from the draft.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.draft.remove_tag(tag)
    }
}

impl Form<ServiceCategory> {
    /// Add an image URL to the draft.
    pub fn add_image(&mut self, url: &str) -> bool {
        self.draft.add_image(url)
    }

    /// Remove an image URL from the draft.
    pub fn remove_image(&mut self, url: &str) -> bool {
        self.draft.remove_image(url)
    }
}

/// The admin panel's open modal, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    /// No form is open.
    #[default]
    Viewing,
    /// The portfolio item form is open.
    Portfolio(Form<PortfolioItem>),
    /// The service category form is open.
    Services(Form<ServiceCategory>),
}

impl Modal {
    /// The kind and mode of the open form, or `None` when viewing.
    #[must_use]
    pub fn open_form(&self) -> Option<(EntityKind, FormMode)> {
        match self {
            Self::Viewing => None,
            Self::Portfolio(form) => Some((EntityKind::Portfolio, form.mode())),
            Self::Services(form) => Some((EntityKind::Services, form.mode())),
        }
    }
}

/// Entities that have an admin form.
pub trait Editable: Entity + Default {
    /// Put a form into the modal slot.
    fn into_modal(form: Form<Self>) -> Modal;

    /// Borrow this kind's form out of the modal slot.
    fn form_mut(modal: &mut Modal) -> Option<&mut Form<Self>>;
}

impl Editable for PortfolioItem {
    fn into_modal(form: Form<Self>) -> Modal {
        Modal::Portfolio(form)
    }

    fn form_mut(modal: &mut Modal) -> Option<&mut Form<Self>> {
        match modal {
            Modal::Portfolio(form) => Some(form),
            _ => None,
        }
    }
}

impl Editable for ServiceCategory {
    fn into_modal(form: Form<Self>) -> Modal {
        Modal::Services(form)
    }

    fn form_mut(modal: &mut Modal) -> Option<&mut Form<Self>> {
        match modal {
            Modal::Services(form) => Some(form),
            _ => None,
        }
    }
}

/// The admin surface: session, modal state and store access.
///
/// Only one form is open at a time; opening a form replaces whatever draft
/// was open before.
#[derive(Debug)]
pub struct AdminPanel<'s, B> {
    store: &'s ContentStore<B>,
    policy: UrlPolicy,
    session: AdminSession,
    modal: Modal,
}

impl<'s, B: SlotBackend> AdminPanel<'s, B> {
    /// A logged-out panel over `store`.
    pub fn new(store: &'s ContentStore<B>, policy: UrlPolicy) -> Self {
        Self {
            store,
            policy,
            session: AdminSession::new(),
            modal: Modal::Viewing,
        }
    }

    /// Log in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] on mismatch.
    pub fn login(
        &mut self,
        verifier: &dyn CredentialVerifier,
        credentials: &Credentials,
    ) -> Result<()> {
        self.session.login(verifier, credentials)
    }

    /// Log out, discarding any open draft.
    pub fn logout(&mut self) {
        self.modal = Modal::Viewing;
        self.session.logout();
    }

    /// The session state.
    #[must_use]
    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    /// The current modal.
    #[must_use]
    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// The committed list for `E`.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the store cannot be read.
    pub fn list<E: Editable>(&self) -> Result<Vec<E>> {
        self.session.require()?;
        self.store.load()
    }

    /// Overview counts.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the store cannot be read.
    pub fn stats(&self) -> Result<ContentStats> {
        self.session.require()?;
        self.store.stats()
    }

    /// Open an empty form for a new `E`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if not logged in.
    pub fn open_add<E: Editable>(&mut self) -> Result<&mut Form<E>> {
        self.session.require()?;
        debug!(kind = %E::KIND, "Opening add form");
        self.open(Form::adding())
    }

    /// Open a form editing the committed entity with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if not logged in, or
    /// [`Error::EntityNotFound`] if no entity has that id.
    pub fn open_edit<E: Editable>(&mut self, id: &str) -> Result<&mut Form<E>> {
        self.session.require()?;
        let entity = self
            .store
            .get::<E>(id)?
            .ok_or_else(|| Error::not_found(E::KIND, id))?;
        debug!(kind = %E::KIND, id, "Opening edit form");
        self.open(Form::editing(entity))
    }

    /// The open form for `E`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenForm`] if no `E` form is open.
    pub fn form<E: Editable>(&mut self) -> Result<&mut Form<E>> {
        E::form_mut(&mut self.modal).ok_or(Error::NoOpenForm(E::KIND))
    }

    /// Validate and commit the open `E` draft, then close the form.
    ///
    /// On any error the form stays open with its draft intact.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in, no `E` form is open, the draft
    /// fails validation, or the store rejects the upsert.
    pub fn save<E: Editable>(&mut self) -> Result<Vec<E>> {
        self.session.require()?;
        let form = E::form_mut(&mut self.modal).ok_or(Error::NoOpenForm(E::KIND))?;
        let mode = form.mode();
        let entity = form.submission(&self.policy)?;

        let items = self.store.upsert(entity)?;
        info!(kind = %E::KIND, ?mode, "Saved draft");
        self.modal = Modal::Viewing;
        Ok(items)
    }

    /// Close the open form without committing.
    pub fn cancel(&mut self) {
        if let Some((kind, mode)) = self.modal.open_form() {
            debug!(%kind, ?mode, "Discarding draft");
        }
        self.modal = Modal::Viewing;
    }

    /// Delete the committed `E` with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the store fails.
    pub fn delete<E: Editable>(&mut self, id: &str) -> Result<Vec<E>> {
        self.session.require()?;
        info!(kind = %E::KIND, id, "Deleting entity");
        self.store.remove(id)
    }

    /// Replace the `E` list with its seed entries.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the store fails.
    pub fn reseed<E: Editable>(&mut self) -> Result<Vec<E>> {
        self.session.require()?;
        self.store.reseed()
    }

    fn open<E: Editable>(&mut self, form: Form<E>) -> Result<&mut Form<E>> {
        self.modal = E::into_modal(form);
        self.form()
    }
}
