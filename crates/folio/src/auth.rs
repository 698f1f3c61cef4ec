//! Admin login.
//!
//! Logging in only flips a flag on the current [`AdminSession`]; there is no
//! token, no expiry and nothing persisted. The check itself sits behind the
//! [`CredentialVerifier`] trait so a real identity provider can replace the
//! configured username/password pair.

use tracing::{info, warn};

use crate::config::AdminConfig;
use crate::error::{Error, Result};

/// A submitted username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Submitted username.
    pub username: String,
    /// Submitted password.
    pub password: String,
}

impl Credentials {
    /// Create a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Decides whether submitted credentials are valid.
pub trait CredentialVerifier {
    /// Return `true` if the credentials identify an admin.
    fn verify(&self, credentials: &Credentials) -> bool;
}

/// Compares against one fixed username/password pair.
#[derive(Clone)]
pub struct StaticCredentials {
    expected: Credentials,
}

impl StaticCredentials {
    /// Accept exactly this pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            expected: Credentials::new(username, password),
        }
    }

    /// Accept the pair from the admin configuration.
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.expected.username)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, credentials: &Credentials) -> bool {
        *credentials == self.expected
    }
}

/// Session-scoped admin state.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    user: Option<String>,
}

impl AdminSession {
    /// A logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check credentials and, on success, mark the session authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] on mismatch; the session state
    /// is left unchanged.
    pub fn login(
        &mut self,
        verifier: &dyn CredentialVerifier,
        credentials: &Credentials,
    ) -> Result<()> {
        if !verifier.verify(credentials) {
            warn!(username = %credentials.username, "Admin login rejected");
            return Err(Error::InvalidCredentials);
        }
        info!(username = %credentials.username, "Admin logged in");
        self.user = Some(credentials.username.clone());
        Ok(())
    }

    /// Clear the session.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(username = %user, "Admin logged out");
        }
    }

    /// Whether an admin is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The logged-in username.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Fail unless an admin is logged in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] for a logged-out session.
    pub fn require(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::NotAuthenticated)
        }
    }
}
