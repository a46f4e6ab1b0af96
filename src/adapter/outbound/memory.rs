//! In-memory ban store for single-process deployments and testing.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::time::Instant;

use crate::domain::BanRecord;
use crate::error::Result;
use crate::port::BanStore;

/// Process-local ban store with TTL expiry.
///
/// Bans written here are not visible to other processes.
#[derive(Debug, Default)]
pub struct MemoryBanStore {
    entries: RwLock<HashMap<String, (BanRecord, Instant)>>,
}

impl MemoryBanStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BanStore for MemoryBanStore {
    async fn get(&self, key: &str) -> Result<Option<BanRecord>> {
        let now = Instant::now();
        let entry = self.entries.read().get(key).copied();
        match entry {
            Some((record, expires_at)) if now < expires_at => Ok(Some(record)),
            Some(_) => {
                self.entries.write().remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, record: BanRecord, ttl: Duration) -> Result<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .insert(key.to_string(), (record, expires_at));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test(start_paused = true)]
    async fn set_then_get() {
        let store = MemoryBanStore::new();
        let record = BanRecord::new(Utc::now());
        store.set("k", record, Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(record));
        assert_eq!(store.get("other").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let store = MemoryBanStore::new();
        store
            .set("k", BanRecord::new(Utc::now()), Duration::from_secs(60))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
