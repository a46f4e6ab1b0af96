//! Provider catalog and ban store settings.

use serde::Deserialize;

/// Provider catalog selection.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Fixed active provider. When set, the database is not consulted.
    #[serde(default)]
    pub provider: Option<String>,
}

fn default_database_url() -> String {
    "exgate.db".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            provider: None,
        }
    }
}

/// Ban store implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanStoreBackend {
    /// Process-local store; bans are not shared between instances.
    #[default]
    Memory,
    /// Redis; bans are visible to every instance sharing the server.
    Redis,
}

/// Ban store selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BanStoreConfig {
    #[serde(default)]
    pub backend: BanStoreBackend,
    /// Connection URL, required for the Redis backend.
    #[serde(default)]
    pub redis_url: Option<String>,
}
