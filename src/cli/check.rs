//! `exgate check <provider>`: test API credentials.

use super::output;
use crate::domain::ProviderName;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_manager;
use crate::infrastructure::config::settings::Config;

pub async fn execute(config: &Config, provider: &str, json: bool) -> Result<()> {
    let manager = build_manager(config).await?;
    let outcome = manager
        .test_exchange_credentials(&ProviderName::new(provider))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.status {
        output::ok(&outcome.message);
        if let Some(balance) = &outcome.balance {
            output::section("Balances");
            if balance.is_empty() {
                output::note("(no non-zero balances)");
            }
            for (asset, amount) in &balance.totals {
                output::key_value(asset, amount);
            }
        }
    } else {
        output::error(&outcome.message);
    }

    if !outcome.status {
        std::process::exit(1);
    }
    Ok(())
}
