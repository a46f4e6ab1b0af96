//! HTTP gateway connector settings.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Per-provider gateway endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayProviderConfig {
    /// Base URL of the provider's REST gateway, without trailing slash.
    pub base_url: String,
}

/// HTTP client settings shared by every gateway connector.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Total request timeout (milliseconds).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection establishment timeout (milliseconds).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Gateway endpoints keyed by provider name.
    #[serde(default)]
    pub providers: BTreeMap<String, GatewayProviderConfig>,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            providers: BTreeMap::new(),
        }
    }
}
