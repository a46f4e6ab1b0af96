//! Composition root: builds the manager and its adapters from [`Config`].

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::catalog::StaticProviderCatalog;
use crate::adapter::outbound::env::EnvCredentialSource;
use crate::adapter::outbound::gateway::HttpConnectorFactory;
use crate::adapter::outbound::memory::MemoryBanStore;
use crate::adapter::outbound::sqlite::SqliteProviderCatalog;
use crate::application::manager::{ExchangeManager, ManagerDeps};
use crate::domain::ProviderName;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::BanStoreBackend;
use crate::port::{BanStore, ProviderCatalog, SystemClock};

/// Build the configured ban store.
///
/// # Errors
///
/// Returns an error if the Redis backend is selected and the server cannot
/// be reached, or if the binary was built without Redis support.
pub async fn build_ban_store(config: &Config) -> Result<Arc<dyn BanStore>> {
    match config.ban_store.backend {
        BanStoreBackend::Memory => {
            info!(backend = "memory", "Ban store initialized");
            Ok(Arc::new(MemoryBanStore::new()))
        }
        BanStoreBackend::Redis => build_redis_ban_store(config).await,
    }
}

#[cfg(feature = "redis")]
async fn build_redis_ban_store(config: &Config) -> Result<Arc<dyn BanStore>> {
    use crate::adapter::outbound::redis::RedisBanStore;
    use crate::error::ConfigError;

    let url = config
        .ban_store
        .redis_url
        .as_deref()
        .ok_or(ConfigError::MissingField { field: "redis_url" })?;
    let store = RedisBanStore::connect(url).await?;
    info!(backend = "redis", "Ban store initialized");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "redis"))]
async fn build_redis_ban_store(_config: &Config) -> Result<Arc<dyn BanStore>> {
    Err(crate::error::ConfigError::InvalidValue {
        field: "ban_store.backend",
        reason: "built without the `redis` feature".to_string(),
    }
    .into())
}

/// Build the provider catalog: a fixed provider when configured, otherwise
/// the SQLite catalog.
///
/// # Errors
///
/// Returns an error if the SQLite database cannot be opened or migrated.
pub fn build_catalog(config: &Config) -> Result<Arc<dyn ProviderCatalog>> {
    match config.catalog.provider.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            info!(provider = name, "Using fixed provider catalog");
            Ok(Arc::new(StaticProviderCatalog::new(Some(ProviderName::new(
                name.trim(),
            )))))
        }
        _ => Ok(Arc::new(SqliteProviderCatalog::open(
            &config.catalog.database_url,
        )?)),
    }
}

/// Wire a production [`ExchangeManager`].
///
/// # Errors
///
/// Returns an error if the ban store or catalog cannot be built.
pub async fn build_manager(config: &Config) -> Result<ExchangeManager> {
    let deps = ManagerDeps {
        factory: Arc::new(HttpConnectorFactory::from_config(&config.gateway)),
        credentials: Arc::new(EnvCredentialSource),
        ban_store: build_ban_store(config).await?,
        catalog: build_catalog(config)?,
        clock: Arc::new(SystemClock),
    };
    Ok(ExchangeManager::new(config.manager.clone(), deps))
}
