//! Exchange connector port.
//!
//! The manager drives the external connector library only through these two
//! traits: a factory that constructs handles and the handle's narrow
//! validate / load / balance / close surface.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{BalanceSnapshot, Credentials, ProviderName};
use crate::error::ConnectorError;

/// A live client for one provider and credential pair.
#[async_trait]
pub trait ExchangeConnector: Send + Sync {
    /// Provider this handle talks to.
    fn provider(&self) -> &ProviderName;

    /// Whether the handle was built with credentials.
    ///
    /// Unauthenticated handles can only load public market data.
    fn is_authenticated(&self) -> bool;

    /// Check the credentials against the exchange.
    ///
    /// Returns `Ok(false)` when the exchange rejects them.
    async fn validate_credentials(&self) -> Result<bool, ConnectorError>;

    /// Load the market catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::RateLimited`] when the exchange throttles the
    /// request and another category for other failures.
    async fn load_markets(&self) -> Result<(), ConnectorError>;

    /// Fetch the account balance. Requires an authenticated handle.
    async fn fetch_balance(&self) -> Result<BalanceSnapshot, ConnectorError>;

    /// Release sockets and background tasks held by the handle.
    async fn close(&self);
}

/// Shared reference to a connector handle.
pub type ConnectorHandle = Arc<dyn ExchangeConnector>;

/// True when both references point at the same connector instance.
///
/// Compares data pointers only; vtable pointers for the same type may differ
/// between codegen units.
#[must_use]
pub fn same_handle(a: &ConnectorHandle, b: &ConnectorHandle) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<()>(),
        Arc::as_ptr(b).cast::<()>(),
    )
}

/// Constructs connector handles for a provider.
pub trait ConnectorFactory: Send + Sync {
    /// Build a handle. `None` credentials yield a public, read-only handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unknown to the factory or the
    /// underlying client cannot be constructed.
    fn build(
        &self,
        provider: &ProviderName,
        credentials: Option<&Credentials>,
    ) -> Result<ConnectorHandle, ConnectorError>;
}
