//! exgate - Exchange connectivity manager.
//!
//! Resolves the active exchange provider, connects to it exactly once no
//! matter how many callers ask, and keeps the connection cached. Failures
//! degrade instead of propagating: rejected credentials fall back to a public
//! connector, rate limits impose a process-wide ban, and repeated failures
//! open a per-provider circuit breaker.
//!
//! # Architecture
//!
//! - [`domain`] - Provider names, credentials, bans, attempt counters
//! - [`port`] - Traits for connectors, ban stores, catalogs, credentials, clock
//! - [`adapter`] - HTTP gateway connector, memory/Redis ban stores,
//!   SQLite/static catalogs, environment credentials
//! - [`application`] - [`ExchangeManager`](application::manager::ExchangeManager)
//!   and its initialization protocol
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`cli`] - The `exgate` command-line interface
//!
//! # Features
//!
//! - `redis` (default) - Redis-backed ban store shared between processes
//! - `testkit` - Test doubles for downstream integration tests
//!
//! # Example
//!
//! ```no_run
//! use exgate::infrastructure::bootstrap::build_manager;
//! use exgate::infrastructure::config::settings::Config;
//!
//! # async fn run() -> exgate::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let manager = build_manager(&config).await?;
//! if let Some(exchange) = manager.start_exchange().await {
//!     exchange.load_markets().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
