//! Ban store test doubles.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::BanRecord;
use crate::error::{Error, Result};
use crate::port::BanStore;

/// Ban store whose every call fails.
pub struct FailingBanStore;

#[async_trait]
impl BanStore for FailingBanStore {
    async fn get(&self, _key: &str) -> Result<Option<BanRecord>> {
        Err(Error::Store("ban store unavailable".into()))
    }

    async fn set(&self, _key: &str, _record: BanRecord, _ttl: Duration) -> Result<()> {
        Err(Error::Store("ban store unavailable".into()))
    }
}
