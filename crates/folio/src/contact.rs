//! Contact form submissions.
//!
//! Messages are validated and acknowledged; there is no delivery backend.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::blank_fields;
use crate::error::{Error, Result};

/// Loose `local@domain.tld` shape check.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("Invalid email pattern"));

/// A message submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Optional subject line.
    #[serde(default)]
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactMessage {
    /// Check required fields and the email shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] listing blank required fields, or a
    /// contact error if the email address is malformed.
    pub fn validate(&self) -> Result<()> {
        let fields = blank_fields([
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ]);
        if !fields.is_empty() {
            return Err(Error::Validation { fields });
        }

        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(Error::contact(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }
        Ok(())
    }

    /// Validate and acknowledge the message.
    ///
    /// # Errors
    ///
    /// Returns the validation error, if any.
    pub fn submit(&self) -> Result<()> {
        self.validate()?;
        info!(
            name = %self.name.trim(),
            email = %self.email.trim(),
            subject = %self.subject.trim(),
            "Contact message received"
        );
        Ok(())
    }
}
