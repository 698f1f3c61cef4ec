//! `folio` - CLI for the portfolio content store
//!
//! This binary browses the portfolio gallery and service catalogue and lets
//! the site admin edit them.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use folio::cli::{
    AdminArgs, Cli, Command, ConfigCommand, ContactCommand, PortfolioAddCommand, PortfolioCommand,
    PortfolioEditCommand, ServicesAddCommand, ServicesCommand, ServicesEditCommand,
};
use folio::reader::NO_SERVICES_MESSAGE;
use folio::{
    init_logging, AdminPanel, Config, ContactMessage, ContentStore, EntityKind, Error,
    PortfolioItem, PortfolioView, ServiceCategory, ServicesView, StaticCredentials, Storage,
    UrlPolicy,
};

type Store = ContentStore<Storage>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let Cli {
        config: config_path,
        database,
        command,
        ..
    } = cli;

    let config = Config::load_from(config_path).context("failed to load configuration")?;

    match command {
        Command::Portfolio(cmd) => handle_portfolio(&open_store(&config, database)?, &config, cmd),
        Command::Services(cmd) => handle_services(&open_store(&config, database)?, &config, cmd),
        Command::Reseed(cmd) => {
            let store = open_store(&config, database)?;
            let mut panel = admin_panel(&store, &config, &cmd.admin)?;
            let kind = EntityKind::from(cmd.kind);
            let count = match kind {
                EntityKind::Portfolio => panel.reseed::<PortfolioItem>()?.len(),
                EntityKind::Services => panel.reseed::<ServiceCategory>()?.len(),
            };
            println!("Reseeded {kind} with {count} default entries.");
            Ok(())
        }
        Command::Stats(cmd) => handle_stats(&open_store(&config, database)?, cmd.json),
        Command::Contact(cmd) => handle_contact(cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the content database, preferring `--database` over configuration.
fn open_store(config: &Config, database: Option<PathBuf>) -> anyhow::Result<Store> {
    let db_path = database.unwrap_or_else(|| config.database_path());
    let storage = Storage::open(&db_path)
        .with_context(|| format!("failed to open content database {}", db_path.display()))?;
    Ok(ContentStore::new(storage))
}

/// Log in with the submitted credentials and return an authenticated panel.
fn admin_panel<'s>(
    store: &'s Store,
    config: &Config,
    admin: &AdminArgs,
) -> anyhow::Result<AdminPanel<'s, Storage>> {
    let policy = UrlPolicy::from_config(&config.content)?;
    let mut panel = AdminPanel::new(store, policy);
    let credentials = admin
        .credentials()
        .ok_or(Error::NotAuthenticated)
        .context("pass --username and --password (or FOLIO_USERNAME / FOLIO_PASSWORD)")?;
    panel.login(&StaticCredentials::from_config(&config.admin), &credentials)?;
    Ok(panel)
}

fn handle_portfolio(store: &Store, config: &Config, cmd: PortfolioCommand) -> anyhow::Result<()> {
    match cmd {
        PortfolioCommand::List { category, json } => {
            let mut view = PortfolioView::load(store)?;
            if let Some(label) = category {
                view.select(label);
            }
            let visible = view.visible();

            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else if visible.is_empty() {
                println!("No portfolio items in '{}'.", view.selected());
            } else {
                println!("{:<16} {:<32} {:<16} Tags", "ID", "Title", "Category");
                for item in visible {
                    println!(
                        "{:<16} {:<32} {:<16} {}",
                        item.id,
                        item.title,
                        item.category,
                        item.tags.join(", ")
                    );
                }
            }
        }
        PortfolioCommand::Categories => {
            let view = PortfolioView::load(store)?;
            for label in view.categories() {
                println!("{label}");
            }
        }
        PortfolioCommand::Add(add) => add_portfolio_item(store, config, add)?,
        PortfolioCommand::Edit(edit) => edit_portfolio_item(store, config, edit)?,
        PortfolioCommand::Remove { id, admin } => {
            let mut panel = admin_panel(store, config, &admin)?;
            let before = panel.list::<PortfolioItem>()?.len();
            let after = panel.delete::<PortfolioItem>(&id)?.len();
            if after < before {
                println!("Removed portfolio item {id}.");
            } else {
                println!("No portfolio item with id {id}.");
            }
        }
    }
    Ok(())
}

fn add_portfolio_item(
    store: &Store,
    config: &Config,
    add: PortfolioAddCommand,
) -> anyhow::Result<()> {
    let mut panel = admin_panel(store, config, &add.admin)?;
    let form = panel.open_add::<PortfolioItem>()?;

    let draft = form.draft_mut();
    draft.title = add.title;
    draft.description = add.description;
    draft.image = add.image;
    draft.category = add.category;
    for tag in &add.tags {
        form.add_tag(tag);
    }

    let items = panel.save::<PortfolioItem>()?;
    if let Some(item) = items.last() {
        println!("Added portfolio item {} ({}).", item.id, item.title);
    }
    Ok(())
}

fn edit_portfolio_item(
    store: &Store,
    config: &Config,
    edit: PortfolioEditCommand,
) -> anyhow::Result<()> {
    let mut panel = admin_panel(store, config, &edit.admin)?;
    let form = panel.open_edit::<PortfolioItem>(&edit.id)?;

    let draft = form.draft_mut();
    if let Some(title) = edit.title {
        draft.title = title;
    }
    if let Some(description) = edit.description {
        draft.description = description;
    }
    if let Some(image) = edit.image {
        draft.image = image;
    }
    if let Some(category) = edit.category {
        draft.category = category;
    }
    for tag in &edit.add_tags {
        form.add_tag(tag);
    }
    for tag in &edit.remove_tags {
        form.remove_tag(tag);
    }

    panel.save::<PortfolioItem>()?;
    println!("Updated portfolio item {}.", edit.id);
    Ok(())
}

fn handle_services(store: &Store, config: &Config, cmd: ServicesCommand) -> anyhow::Result<()> {
    match cmd {
        ServicesCommand::List { json } => {
            let view = ServicesView::load(store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(view.services())?);
            } else if view.is_empty() {
                println!("{NO_SERVICES_MESSAGE}");
            } else {
                println!("{:<16} {:<24} Images", "ID", "Name");
                for service in view.services() {
                    println!(
                        "{:<16} {:<24} {}",
                        service.id,
                        service.name,
                        service.images.len()
                    );
                }
            }
        }
        ServicesCommand::Show { id, advance } => {
            let mut view = ServicesView::load(store)?;
            let service = view
                .services()
                .iter()
                .find(|service| service.id == id)
                .cloned()
                .ok_or_else(|| Error::not_found(EntityKind::Services, id.as_str()))?;

            view.advance(&id, advance);

            println!("{}", service.name);
            println!("{}", service.description);
            if let Some(frame) = view.frame(&id) {
                println!("{frame}");
            }
        }
        ServicesCommand::Add(add) => add_service(store, config, add)?,
        ServicesCommand::Edit(edit) => edit_service(store, config, edit)?,
        ServicesCommand::Remove { id, admin } => {
            let mut panel = admin_panel(store, config, &admin)?;
            let before = panel.list::<ServiceCategory>()?.len();
            let after = panel.delete::<ServiceCategory>(&id)?.len();
            if after < before {
                println!("Removed service {id}.");
            } else {
                println!("No service with id {id}.");
            }
        }
    }
    Ok(())
}

fn add_service(store: &Store, config: &Config, add: ServicesAddCommand) -> anyhow::Result<()> {
    let mut panel = admin_panel(store, config, &add.admin)?;
    let form = panel.open_add::<ServiceCategory>()?;

    let draft = form.draft_mut();
    draft.name = add.name;
    draft.description = add.description;
    for url in &add.images {
        form.add_image(url);
    }

    let services = panel.save::<ServiceCategory>()?;
    if let Some(service) = services.last() {
        println!("Added service {} ({}).", service.id, service.name);
    }
    Ok(())
}

fn edit_service(store: &Store, config: &Config, edit: ServicesEditCommand) -> anyhow::Result<()> {
    let mut panel = admin_panel(store, config, &edit.admin)?;
    let form = panel.open_edit::<ServiceCategory>(&edit.id)?;

    let draft = form.draft_mut();
    if let Some(name) = edit.name {
        draft.name = name;
    }
    if let Some(description) = edit.description {
        draft.description = description;
    }
    for url in &edit.add_images {
        form.add_image(url);
    }
    for url in &edit.remove_images {
        form.remove_image(url);
    }

    panel.save::<ServiceCategory>()?;
    println!("Updated service {}.", edit.id);
    Ok(())
}

fn handle_stats(store: &Store, json: bool) -> anyhow::Result<()> {
    let content = store.stats()?;
    let storage = store.backend().stats()?;
    let portfolio_revision = store.revision(EntityKind::Portfolio)?;
    let services_revision = store.revision(EntityKind::Services)?;

    if json {
        let status = serde_json::json!({
            "content": content,
            "database_path": store.backend().path(),
            "slot_count": storage.slot_count,
            "last_write": storage.last_write,
            "db_size_bytes": storage.db_size_bytes,
            "revisions": {
                "portfolio": portfolio_revision,
                "services": services_revision,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("folio stats");
        println!("-----------");
        println!("Portfolio items:    {}", content.portfolio_items);
        println!("Service categories: {}", content.service_categories);
        println!("Service images:     {}", content.total_images);
        println!();
        println!("Database:           {}", store.backend().path().display());
        println!("Slots:              {}", storage.slot_count);
        println!("Size:               {} bytes", storage.db_size_bytes);
        if let Some(last_write) = storage.last_write {
            println!("Last write:         {}", last_write.to_rfc3339());
        }
        if let Some(revision) = portfolio_revision {
            println!("Portfolio revision: {}", revision.short());
        }
        if let Some(revision) = services_revision {
            println!("Services revision:  {}", revision.short());
        }
    }
    Ok(())
}

fn handle_contact(cmd: ContactCommand) -> anyhow::Result<()> {
    let message = ContactMessage {
        name: cmd.name,
        email: cmd.email,
        subject: cmd.subject.unwrap_or_default(),
        message: cmd.message,
    };
    message.submit()?;
    println!(
        "Thanks, {}! Your message has been received.",
        message.name.trim()
    );
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Admin]");
                println!("  Username:           {}", config.admin.username);
                println!("  Password:           ********");
                println!();
                println!("[Content]");
                let content = &config.content;
                let schemes = content.allowed_schemes.join(", ");
                println!("  Enforce URL policy: {}", content.enforce_url_policy);
                println!("  Allowed schemes:    {schemes}");
                if content.allowed_hosts.is_empty() {
                    println!("  Allowed hosts:      (any)");
                } else {
                    let hosts = content.allowed_hosts.join(", ");
                    println!("  Allowed hosts:      {hosts}");
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
