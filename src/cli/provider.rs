//! `exgate provider`: show the active provider.

use super::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_catalog;
use crate::infrastructure::config::settings::Config;
use crate::port::ProviderCatalog;

pub async fn execute(config: &Config) -> Result<()> {
    let catalog = build_catalog(config)?;
    match catalog.active_provider().await? {
        Some(provider) if !provider.is_blank() => {
            output::key_value("Provider", &provider);
        }
        _ => {
            output::warn("No active exchange provider");
            output::note("  Activate one with: exgate catalog activate <name>");
        }
    }
    Ok(())
}
