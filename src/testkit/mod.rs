//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`connector`] - Scripted [`ConnectorFactory`](crate::port::ConnectorFactory)
//!   and stub connectors with call counters.
//! - [`catalog`], [`credentials`], [`store`] - Fixed-answer collaborators.
//! - [`clock`] - Wall clock that follows paused tokio time.
//! - [`config`] - Canonical test configurations.
//! - [`harness`] - A manager wired over all of the above.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod connector;
pub mod credentials;
pub mod harness;
pub mod store;
