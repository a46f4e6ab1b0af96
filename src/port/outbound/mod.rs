//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the exchange manager depends
//! on: the connector library, credential configuration, the ban store, the
//! provider catalog and the clock.

pub mod clock;
pub mod credentials;
pub mod exchange;
pub mod store;
