//! `exgate catalog`: administer the SQLite provider catalog.

use super::{output, CatalogCommand};
use crate::adapter::outbound::sqlite::SqliteProviderCatalog;
use crate::domain::ProviderName;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

pub fn execute(config: &Config, command: CatalogCommand) -> Result<()> {
    let catalog = SqliteProviderCatalog::open(&config.catalog.database_url)?;
    match command {
        CatalogCommand::List => {
            let providers = catalog.list()?;
            if providers.is_empty() {
                output::note("No providers registered");
            }
            for provider in providers {
                let marker = if provider.is_active { "*" } else { " " };
                output::note(&format!("{marker} {}", provider.name));
            }
        }
        CatalogCommand::Add(arg) => {
            catalog.upsert(&ProviderName::new(arg.name.trim()))?;
            output::ok(&format!("Registered {}", arg.name.trim()));
        }
        CatalogCommand::Activate(arg) => {
            catalog.activate(&ProviderName::new(arg.name.trim()))?;
            output::ok(&format!("Activated {}", arg.name.trim()));
        }
    }
    Ok(())
}
