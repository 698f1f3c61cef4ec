//! `folio` - content store for a small portfolio site
//!
//! This library persists the portfolio gallery and service catalogue in
//! named storage slots, serves them to read-only views, and lets an
//! authenticated admin edit them through validated forms.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod logging;
pub mod reader;
pub mod storage;
pub mod store;
pub mod url_policy;
pub mod writer;

pub use auth::{AdminSession, CredentialVerifier, Credentials, StaticCredentials};
pub use config::Config;
pub use contact::ContactMessage;
pub use content::{Entity, EntityKind, PortfolioItem, ServiceCategory};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use reader::{CarouselFrame, PortfolioView, ServicesView};
pub use storage::{Revision, SlotBackend, Storage, StorageStats};
pub use store::{ChangeEvent, ContentStats, ContentStore};
pub use url_policy::UrlPolicy;
pub use writer::{AdminPanel, Form, FormMode, Modal};
