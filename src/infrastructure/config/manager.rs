//! Exchange manager retry, circuit breaker and ban settings.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::CircuitPolicy;

/// Tuning for the exchange manager's initialization protocol.
///
/// The retry budget and the circuit breaker threshold are independent; the
/// defaults reproduce three attempts per call opening a thirty minute circuit.
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerConfig {
    /// Retries after the first failed attempt within one initialization.
    #[serde(default = "default_retry_budget")]
    pub retry_budget: u32,
    /// Delay between retries (seconds).
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// Failed attempts that open the per-provider circuit.
    #[serde(default = "default_circuit_threshold")]
    pub circuit_threshold: u32,
    /// How long an open circuit blocks new attempts (seconds).
    #[serde(default = "default_circuit_window_secs")]
    pub circuit_window_secs: u64,
    /// Ban length imposed when the exchange rate-limits us (seconds).
    #[serde(default = "default_rate_limit_ban_secs")]
    pub rate_limit_ban_secs: u64,
    /// Rate-limit backoff rounds allowed within one initialization.
    #[serde(default = "default_rate_limit_retries")]
    pub rate_limit_retries: u32,
    /// Upper bound on a credential test's network calls (seconds).
    #[serde(default = "default_credential_test_timeout_secs")]
    pub credential_test_timeout_secs: u64,
    /// Key of the ban record in the ban store.
    #[serde(default = "default_ban_key")]
    pub ban_key: String,
}

fn default_retry_budget() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_circuit_threshold() -> u32 {
    3
}

fn default_circuit_window_secs() -> u64 {
    1800 // 30 minutes
}

fn default_rate_limit_ban_secs() -> u64 {
    60
}

fn default_rate_limit_retries() -> u32 {
    3
}

fn default_credential_test_timeout_secs() -> u64 {
    30
}

fn default_ban_key() -> String {
    "exchange:ban".into()
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            retry_budget: default_retry_budget(),
            retry_delay_secs: default_retry_delay_secs(),
            circuit_threshold: default_circuit_threshold(),
            circuit_window_secs: default_circuit_window_secs(),
            rate_limit_ban_secs: default_rate_limit_ban_secs(),
            rate_limit_retries: default_rate_limit_retries(),
            credential_test_timeout_secs: default_credential_test_timeout_secs(),
            ban_key: default_ban_key(),
        }
    }
}

impl ManagerConfig {
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    #[must_use]
    pub fn rate_limit_ban(&self) -> Duration {
        Duration::from_secs(self.rate_limit_ban_secs)
    }

    #[must_use]
    pub fn credential_test_timeout(&self) -> Duration {
        Duration::from_secs(self.credential_test_timeout_secs)
    }

    #[must_use]
    pub fn circuit_policy(&self) -> CircuitPolicy {
        CircuitPolicy {
            threshold: self.circuit_threshold,
            window: chrono::Duration::from_std(Duration::from_secs(self.circuit_window_secs))
                .unwrap_or_else(|_| chrono::Duration::days(36_500)),
        }
    }
}
