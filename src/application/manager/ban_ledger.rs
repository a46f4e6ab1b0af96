//! Ban ledger over the shared ban store.
//!
//! Every check reads through to the store so a ban imposed by one process is
//! seen by all others sharing it. Store failures fail open: an unreadable
//! ban is treated as no ban.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::domain::BanRecord;
use crate::error::Result;
use crate::port::{BanStore, Clock};

const COMPONENT: &str = "ban_ledger";

pub struct BanLedger {
    store: Arc<dyn BanStore>,
    clock: Arc<dyn Clock>,
    key: String,
}

impl BanLedger {
    pub fn new(store: Arc<dyn BanStore>, clock: Arc<dyn Clock>, key: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            key: key.into(),
        }
    }

    /// Read the persisted ban window. `None` means not banned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn load(&self) -> Result<Option<BanRecord>> {
        self.store.get(&self.key).await
    }

    /// Persist a ban ending at `banned_until`, replacing any prior one.
    ///
    /// The store TTL matches the remaining window.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn save(&self, banned_until: DateTime<Utc>) -> Result<BanRecord> {
        let record = BanRecord::new(banned_until);
        let ttl = banned_until
            .signed_duration_since(self.clock.now())
            .to_std()
            .unwrap_or(Duration::ZERO)
            .max(Duration::from_secs(1));
        self.store.set(&self.key, record, ttl).await?;
        Ok(record)
    }

    /// True when `record` exists and its window has not ended.
    #[must_use]
    pub fn is_active(&self, record: Option<&BanRecord>) -> bool {
        record.is_some_and(|r| r.is_active_at(self.clock.now()))
    }

    /// Load and check the ban in one step, failing open on store errors.
    pub async fn is_banned(&self) -> bool {
        match self.load().await {
            Ok(record) => self.is_active(record.as_ref()),
            Err(e) => {
                warn!(
                    component = COMPONENT,
                    key = %self.key,
                    error = %e,
                    "Failed to read ban record, assuming no ban"
                );
                false
            }
        }
    }

    /// Ban all connection attempts for `duration` from now.
    ///
    /// A failed write is logged; the returned record still describes the
    /// intended window so the caller can honor it locally.
    pub async fn impose(&self, duration: Duration) -> BanRecord {
        let banned_until = self.clock.now()
            + chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
        match self.save(banned_until).await {
            Ok(record) => record,
            Err(e) => {
                error!(
                    component = COMPONENT,
                    key = %self.key,
                    error = %e,
                    "Failed to persist ban record"
                );
                BanRecord::new(banned_until)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryBanStore;
    use crate::testkit::clock::VirtualClock;
    use crate::testkit::store::FailingBanStore;

    fn ledger(store: Arc<dyn BanStore>) -> BanLedger {
        BanLedger::new(store, Arc::new(VirtualClock::new()), "test:ban")
    }

    #[tokio::test(start_paused = true)]
    async fn absent_record_is_not_banned() {
        let ledger = ledger(Arc::new(MemoryBanStore::new()));
        assert!(ledger.load().await.unwrap().is_none());
        assert!(!ledger.is_banned().await);
    }

    #[tokio::test(start_paused = true)]
    async fn imposed_ban_expires_with_time() {
        let ledger = ledger(Arc::new(MemoryBanStore::new()));
        ledger.impose(Duration::from_secs(60)).await;
        assert!(ledger.is_banned().await);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(!ledger.is_banned().await);
    }

    #[tokio::test(start_paused = true)]
    async fn save_replaces_prior_window() {
        let ledger = ledger(Arc::new(MemoryBanStore::new()));
        let clock = VirtualClock::new();
        let first = clock.now() + chrono::Duration::seconds(600);
        let second = clock.now() + chrono::Duration::seconds(30);
        ledger.save(first).await.unwrap();
        ledger.save(second).await.unwrap();
        assert_eq!(ledger.load().await.unwrap().unwrap().banned_until, second);
    }

    #[tokio::test(start_paused = true)]
    async fn store_failure_fails_open() {
        let ledger = ledger(Arc::new(FailingBanStore));
        assert!(!ledger.is_banned().await);
        let record = ledger.impose(Duration::from_secs(60)).await;
        assert!(ledger.is_active(Some(&record)));
    }
}
