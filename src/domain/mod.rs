//! Exchange-agnostic domain types.
//!
//! Nothing here performs I/O; adapters and the application layer build on
//! these types.

pub mod attempt;
pub mod balance;
pub mod ban;
pub mod check;
pub mod credentials;
pub mod id;
pub mod provider;

pub use attempt::{AttemptState, CircuitPolicy};
pub use balance::BalanceSnapshot;
pub use ban::BanRecord;
pub use check::{CredentialFailure, CredentialTestOutcome};
pub use credentials::Credentials;
pub use id::ProviderName;
pub use provider::Provider;
