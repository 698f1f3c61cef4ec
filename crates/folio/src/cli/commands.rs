//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::auth::Credentials;
use crate::content::EntityKind;

/// Admin credentials for mutating commands.
#[derive(Clone, Default, Args)]
pub struct AdminArgs {
    /// Admin username
    #[arg(long, env = "FOLIO_USERNAME")]
    pub username: Option<String>,

    /// Admin password
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl AdminArgs {
    /// The submitted pair, if both halves were given.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                Some(Credentials::new(username.clone(), password.clone()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for AdminArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminArgs")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Portfolio gallery commands.
#[derive(Debug, Subcommand)]
pub enum PortfolioCommand {
    /// List portfolio items
    List {
        /// Only show items in this category ("All" shows everything)
        #[arg(long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the category filter labels
    Categories,

    /// Add a portfolio item
    Add(PortfolioAddCommand),

    /// Edit a portfolio item
    Edit(PortfolioEditCommand),

    /// Remove a portfolio item
    Remove {
        /// Item id
        id: String,

        #[command(flatten)]
        admin: AdminArgs,
    },
}

/// Arguments for adding a portfolio item.
#[derive(Debug, Args)]
pub struct PortfolioAddCommand {
    /// Item title
    #[arg(long)]
    pub title: String,

    /// Item description
    #[arg(long)]
    pub description: String,

    /// Image URL
    #[arg(long)]
    pub image: String,

    /// Category label
    #[arg(long)]
    pub category: String,

    /// Tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub admin: AdminArgs,
}

/// Arguments for editing a portfolio item.
#[derive(Debug, Args)]
pub struct PortfolioEditCommand {
    /// Item id
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New image URL
    #[arg(long)]
    pub image: Option<String>,

    /// New category label
    #[arg(long)]
    pub category: Option<String>,

    /// Tag to add (repeatable)
    #[arg(long = "add-tag")]
    pub add_tags: Vec<String>,

    /// Tag to remove (repeatable)
    #[arg(long = "remove-tag")]
    pub remove_tags: Vec<String>,

    #[command(flatten)]
    pub admin: AdminArgs,
}

/// Service catalogue commands.
#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List service categories
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one service and walk its image carousel
    Show {
        /// Service id
        id: String,

        /// Step the carousel this many times (negative steps back)
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        advance: i64,
    },

    /// Add a service category
    Add(ServicesAddCommand),

    /// Edit a service category
    Edit(ServicesEditCommand),

    /// Remove a service category
    Remove {
        /// Service id
        id: String,

        #[command(flatten)]
        admin: AdminArgs,
    },
}

/// Arguments for adding a service category.
#[derive(Debug, Args)]
pub struct ServicesAddCommand {
    /// Service name
    #[arg(long)]
    pub name: String,

    /// Service description
    #[arg(long)]
    pub description: String,

    /// Image URL (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,

    #[command(flatten)]
    pub admin: AdminArgs,
}

/// Arguments for editing a service category.
#[derive(Debug, Args)]
pub struct ServicesEditCommand {
    /// Service id
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL to add (repeatable)
    #[arg(long = "add-image")]
    pub add_images: Vec<String>,

    /// Image URL to remove (repeatable)
    #[arg(long = "remove-image")]
    pub remove_images: Vec<String>,

    #[command(flatten)]
    pub admin: AdminArgs,
}

/// Reseed command arguments.
#[derive(Debug, Args)]
pub struct ReseedCommand {
    /// Which list to reset
    #[arg(value_enum)]
    pub kind: KindArg,

    #[command(flatten)]
    pub admin: AdminArgs,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Contact form arguments.
#[derive(Debug, Args)]
pub struct ContactCommand {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Your email address
    #[arg(long)]
    pub email: String,

    /// Subject line
    #[arg(long)]
    pub subject: Option<String>,

    /// Message body
    #[arg(long)]
    pub message: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Entity kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Portfolio items
    Portfolio,
    /// Service categories
    Services,
}

impl From<KindArg> for EntityKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Portfolio => Self::Portfolio,
            KindArg::Services => Self::Services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_arg_conversion() {
        assert_eq!(EntityKind::from(KindArg::Portfolio), EntityKind::Portfolio);
        assert_eq!(EntityKind::from(KindArg::Services), EntityKind::Services);
    }

    #[test]
    fn test_admin_args_need_both_halves() {
        let only_user = AdminArgs {
            username: Some("admin".to_string()),
            password: None,
        };
        assert!(only_user.credentials().is_none());
        assert!(AdminArgs::default().credentials().is_none());

        let both = AdminArgs {
            username: Some("admin".to_string()),
            password: Some("admin123".to_string()),
        };
        assert_eq!(
            both.credentials(),
            Some(Credentials::new("admin", "admin123"))
        );
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
