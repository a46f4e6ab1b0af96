//! Outbound adapters (driven side).

pub mod catalog;
pub mod env;
pub mod gateway;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;
pub mod sqlite;
