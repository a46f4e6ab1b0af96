//! Fully wired [`ExchangeManager`] over test doubles.

use std::sync::Arc;

use crate::adapter::outbound::memory::MemoryBanStore;
use crate::application::manager::{ExchangeManager, ManagerDeps};
use crate::infrastructure::config::manager::ManagerConfig;
use crate::domain::BanRecord;
use crate::port::{BanStore, Clock, CredentialSource, ProviderCatalog};

use super::catalog::StaticCatalog;
use super::clock::VirtualClock;
use super::connector::ScriptedConnectorFactory;
use super::credentials::StaticCredentials;

/// Manager plus handles on every collaborator for assertions.
pub struct Harness {
    pub manager: ExchangeManager,
    pub factory: ScriptedConnectorFactory,
    pub catalog: Arc<StaticCatalog>,
    pub credentials: Arc<StaticCredentials>,
    pub ban_store: Arc<MemoryBanStore>,
    pub clock: Arc<VirtualClock>,
    ban_key: String,
}

impl Harness {
    /// Harness with `active` as the active provider and valid credentials
    /// for `active`.
    pub fn new(active: &str) -> Self {
        Self::with_config(active, super::config::manager())
    }

    pub fn with_config(active: &str, config: ManagerConfig) -> Self {
        let factory = ScriptedConnectorFactory::new();
        let catalog = Arc::new(StaticCatalog::active(active));
        let credentials = Arc::new(StaticCredentials::new().with(active, "key", "secret"));
        let clock = Arc::new(VirtualClock::new());
        let ban_store = Arc::new(MemoryBanStore::new());
        let ban_key = config.ban_key.clone();

        let manager = ExchangeManager::new(
            config,
            ManagerDeps {
                factory: Arc::new(factory.clone()),
                credentials: Arc::clone(&credentials) as Arc<dyn CredentialSource>,
                ban_store: Arc::clone(&ban_store) as Arc<dyn BanStore>,
                catalog: Arc::clone(&catalog) as Arc<dyn ProviderCatalog>,
                clock: Arc::clone(&clock) as Arc<dyn Clock>,
            },
        );

        Self {
            manager,
            factory,
            catalog,
            credentials,
            ban_store,
            clock,
            ban_key,
        }
    }

    /// Store a ban ending `secs` seconds from now.
    pub async fn ban_for(&self, secs: u64) {
        let until = self.clock.now() + chrono::Duration::seconds(secs as i64);
        let ttl = std::time::Duration::from_secs(secs.max(1));
        let _ = self
            .ban_store
            .set(&self.ban_key, BanRecord::new(until), ttl)
            .await;
    }

    /// The ban currently stored, if any.
    pub async fn stored_ban(&self) -> Option<BanRecord> {
        self.ban_store.get(&self.ban_key).await.ok().flatten()
    }
}
