//! Exchange API credentials.

use std::fmt;

/// API key material for one provider.
///
/// Only constructed through [`Credentials::from_parts`], which rejects a
/// missing or empty key or secret. `Debug` never prints the secret values.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
    passphrase: Option<String>,
}

impl Credentials {
    /// Build credentials from raw, possibly missing parts.
    ///
    /// Returns `None` if the key or secret is absent or blank. A blank
    /// passphrase is treated as absent.
    pub fn from_parts(
        api_key: Option<String>,
        api_secret: Option<String>,
        passphrase: Option<String>,
    ) -> Option<Self> {
        let api_key = api_key.filter(|k| !k.trim().is_empty())?;
        let api_secret = api_secret.filter(|s| !s.trim().is_empty())?;
        let passphrase = passphrase.filter(|p| !p.trim().is_empty());
        Some(Self {
            api_key,
            api_secret,
            passphrase,
        })
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    #[must_use]
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
