//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (exchange connectors, key/value stores, databases).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │    ExchangeManager      │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Connector│            │  Ban store  │              │  Provider │
//! │ Adapter │            │   Adapter   │              │  Catalog  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ConnectorFactory`], [`ExchangeConnector`] - Exchange connector library
//! - [`CredentialSource`] - API key material
//! - [`BanStore`] - Shared ban window persistence
//! - [`ProviderCatalog`] - Active provider lookup
//! - [`Clock`] - Wall-clock time

pub mod outbound;

pub use outbound::clock::{Clock, SystemClock};
pub use outbound::credentials::CredentialSource;
pub use outbound::exchange::{same_handle, ConnectorFactory, ConnectorHandle, ExchangeConnector};
pub use outbound::store::{BanStore, ProviderCatalog};
