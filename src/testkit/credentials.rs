//! In-memory credential source.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{Credentials, ProviderName};
use crate::port::CredentialSource;

/// Credential source backed by a map, mirroring the env-var semantics:
/// a missing or empty key or secret yields no credentials.
#[derive(Default)]
pub struct StaticCredentials {
    entries: RwLock<HashMap<ProviderName, (String, String, Option<String>)>>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, provider: &str, key: &str, secret: &str) -> Self {
        self.set(provider, key, secret, None);
        self
    }

    pub fn set(&self, provider: &str, key: &str, secret: &str, passphrase: Option<&str>) {
        self.entries.write().insert(
            ProviderName::from(provider),
            (key.to_string(), secret.to_string(), passphrase.map(String::from)),
        );
    }
}

impl CredentialSource for StaticCredentials {
    fn credentials(&self, provider: &ProviderName) -> Option<Credentials> {
        let entries = self.entries.read();
        let (key, secret, passphrase) = entries.get(provider)?;
        Credentials::from_parts(Some(key.clone()), Some(secret.clone()), passphrase.clone())
    }
}
