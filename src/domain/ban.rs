//! Process-wide connection ban window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted record barring all connection attempts until `banned_until`.
///
/// Serialized as `{"bannedUntil": "<RFC3339>"}` so other processes sharing
/// the store read the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRecord {
    pub banned_until: DateTime<Utc>,
}

impl BanRecord {
    pub const fn new(banned_until: DateTime<Utc>) -> Self {
        Self { banned_until }
    }

    /// True while `now` is strictly before the end of the window.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.banned_until
    }
}
