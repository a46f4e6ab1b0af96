//! Redis-backed ban store.
//!
//! The ban is stored as JSON `{"bannedUntil": "<RFC3339>"}` with a native
//! key expiry, so every instance sharing the server observes the same window
//! and stale bans disappear on their own.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use crate::domain::BanRecord;
use crate::error::Result;
use crate::port::BanStore;

/// Ban store over a Redis connection manager (reconnects transparently).
#[derive(Clone)]
pub struct RedisBanStore {
    conn: ConnectionManager,
}

impl RedisBanStore {
    /// Connect to the Redis server at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the server is unreachable.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        info!(component = "redis_ban_store", "Connected to Redis ban store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl BanStore for RedisBanStore {
    async fn get(&self, key: &str) -> Result<Option<BanRecord>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key).await?;
        raw.map(|value| serde_json::from_str(&value).map_err(Into::into))
            .transpose()
    }

    async fn set(&self, key: &str, record: BanRecord, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let value = serde_json::to_string(&record)?;
        conn.set_ex::<_, _, ()>(key, value, expiry_secs(ttl)).await?;
        Ok(())
    }
}

/// Whole seconds for `EX`, rounded up so the key never expires before the ban.
fn expiry_secs(ttl: Duration) -> u64 {
    (ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_rounds_partial_seconds_up() {
        assert_eq!(expiry_secs(Duration::from_millis(59_990)), 60);
        assert_eq!(expiry_secs(Duration::from_secs(60)), 60);
        assert_eq!(expiry_secs(Duration::from_millis(1)), 1);
        assert_eq!(expiry_secs(Duration::ZERO), 1);
    }
}
