//! Command-line interface for folio.
//!
//! This module provides the CLI structure for the `folio` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AdminArgs, ConfigCommand, ContactCommand, KindArg, PortfolioAddCommand, PortfolioCommand,
    PortfolioEditCommand, ReseedCommand, ServicesAddCommand, ServicesCommand, ServicesEditCommand,
    StatsCommand,
};

use crate::logging::Verbosity;

/// folio - Manage portfolio and services content
///
/// Browse the portfolio gallery and service catalogue, and edit them as the
/// site admin.
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the content database (overrides configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse or edit the portfolio gallery
    #[command(subcommand)]
    Portfolio(PortfolioCommand),

    /// Browse or edit the service catalogue
    #[command(subcommand)]
    Services(ServicesCommand),

    /// Reset a list to its default entries
    Reseed(ReseedCommand),

    /// Show content counts and storage status
    Stats(StatsCommand),

    /// Send a message through the contact form
    Contact(ContactCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "folio");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["folio", "-q", "stats"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["folio", "stats"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["folio", "-v", "stats"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["folio", "-vv", "stats"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_global_paths() {
        let cli = parse(&[
            "folio",
            "-c",
            "/custom/config.toml",
            "--database",
            "/tmp/content.db",
            "stats",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/content.db")));
    }

    #[test]
    fn test_parse_portfolio_list_with_category() {
        let cli = parse(&["folio", "portfolio", "list", "--category", "Branding", "--json"]);
        match cli.command {
            Command::Portfolio(PortfolioCommand::List { category, json }) => {
                assert_eq!(category.as_deref(), Some("Branding"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_portfolio_add_with_tags() {
        let cli = parse(&[
            "folio",
            "portfolio",
            "add",
            "--title",
            "Test",
            "--description",
            "D",
            "--image",
            "https://a.io/x.jpg",
            "--category",
            "Branding",
            "--tag",
            "Logo",
            "--tag",
            "Print",
            "--username",
            "admin",
            "--password",
            "admin123",
        ]);
        match cli.command {
            Command::Portfolio(PortfolioCommand::Add(add)) => {
                assert_eq!(add.tags, vec!["Logo", "Print"]);
                assert!(add.admin.credentials().is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_portfolio_add_requires_fields() {
        assert!(Cli::try_parse_from(["folio", "portfolio", "add", "--title", "T"]).is_err());
    }

    #[test]
    fn test_parse_services_edit_lists() {
        let cli = parse(&[
            "folio",
            "services",
            "edit",
            "1",
            "--add-image",
            "https://a.io/1.jpg",
            "--remove-image",
            "https://a.io/0.jpg",
        ]);
        match cli.command {
            Command::Services(ServicesCommand::Edit(edit)) => {
                assert_eq!(edit.id, "1");
                assert_eq!(edit.add_images, vec!["https://a.io/1.jpg"]);
                assert_eq!(edit.remove_images, vec!["https://a.io/0.jpg"]);
                assert!(edit.name.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_services_show_negative_advance() {
        let cli = parse(&["folio", "services", "show", "1", "--advance", "-1"]);
        assert!(matches!(
            cli.command,
            Command::Services(ServicesCommand::Show { advance: -1, .. })
        ));
    }

    #[test]
    fn test_parse_reseed() {
        let cli = parse(&["folio", "reseed", "services"]);
        match cli.command {
            Command::Reseed(cmd) => assert_eq!(cmd.kind, KindArg::Services),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["folio", "reseed", "everything"]).is_err());
    }

    #[test]
    fn test_parse_contact() {
        let cli = parse(&[
            "folio",
            "contact",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--message",
            "Hi",
        ]);
        match cli.command {
            Command::Contact(cmd) => {
                assert_eq!(cmd.name, "Ada");
                assert!(cmd.subject.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["folio", "config", "validate", "--file", "/tmp/c.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
