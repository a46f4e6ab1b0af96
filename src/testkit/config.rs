//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::manager::ManagerConfig;

/// Manager config with production timings.
///
/// Tests run with paused tokio time, so the real 5 s retry delay, 60 s ban
/// and 30 min circuit window cost nothing while keeping their proportions.
pub fn manager() -> ManagerConfig {
    ManagerConfig {
        ban_key: "test:exchange:ban".into(),
        ..ManagerConfig::default()
    }
}
