//! Configuration loaded from TOML with environment overrides.

pub mod gateway;
pub mod logging;
pub mod manager;
pub mod settings;
pub mod store;
