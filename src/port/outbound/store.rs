//! Persistence ports: the shared ban store and the provider catalog.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{BanRecord, ProviderName};
use crate::error::Result;

/// Key/value store with TTL semantics holding the process-wide ban window.
///
/// Implementations may be shared by several processes; concurrent writers
/// resolve as last-write-wins.
#[async_trait]
pub trait BanStore: Send + Sync {
    /// Read the ban stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<BanRecord>>;

    /// Store `record` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, record: BanRecord, ttl: Duration) -> Result<()>;
}

/// Catalog of configured exchange providers.
#[async_trait]
pub trait ProviderCatalog: Send + Sync {
    /// The single provider currently flagged active, if any.
    async fn active_provider(&self) -> Result<Option<ProviderName>>;
}
