//! `exgate connect`: start a connector and report what came up.

use super::output;
use crate::domain::ProviderName;
use crate::error::{ConnectorError, Result};
use crate::infrastructure::bootstrap::build_manager;
use crate::infrastructure::config::settings::Config;

pub async fn execute(config: &Config, provider: Option<&str>) -> Result<()> {
    let manager = build_manager(config).await?;

    let (name, handle) = match provider {
        Some(name) => {
            let name = ProviderName::new(name);
            let handle = manager.start_exchange_provider(&name).await;
            (Some(name), handle)
        }
        None => {
            let handle = manager.start_exchange().await;
            (manager.get_provider().await, handle)
        }
    };

    output::section("Exchange connection");
    let Some(name) = name else {
        output::error("No active exchange provider");
        return Err(ConnectorError::Unavailable("no active provider".into()).into());
    };
    output::key_value("Provider", &name);

    let Some(handle) = handle else {
        let state = manager.attempt_state(&name);
        output::error("Exchange unavailable; features degraded");
        output::key_value("Attempts", state.attempt_count);
        if let Some(at) = state.last_attempt_at {
            output::key_value("Last attempt", at.to_rfc3339());
        }
        return Err(ConnectorError::Unavailable(format!("could not connect to {name}")).into());
    };

    if handle.is_authenticated() {
        output::ok("Connected with API credentials");
    } else {
        output::warn("Connected in public mode (credentials missing or rejected)");
    }

    if provider.is_some() {
        manager.remove_exchange(&name).await?;
    } else {
        manager.stop_exchange().await;
    }
    Ok(())
}
