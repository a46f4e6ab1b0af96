//! Credential source port.

use crate::domain::{Credentials, ProviderName};

/// Reads API credentials for a provider from process configuration.
pub trait CredentialSource: Send + Sync {
    /// Complete credentials for `provider`, or `None` if the key or secret is
    /// missing or empty.
    fn credentials(&self, provider: &ProviderName) -> Option<Credentials>;
}
