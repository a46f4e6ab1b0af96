//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exchange provider identifier - newtype for type safety.
///
/// Used as the connection cache key and to derive the credential
/// environment variable names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderName(String);

impl ProviderName {
    /// Create a new `ProviderName` from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the provider name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Upper-cased form used in `APP_<PROVIDER>_*` variable names.
    ///
    /// Characters that are not valid in environment variable names map to `_`.
    #[must_use]
    pub fn env_prefix(&self) -> String {
        self.0
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProviderName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ProviderName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_prefix_upper_cases() {
        assert_eq!(ProviderName::from("binance").env_prefix(), "BINANCE");
    }

    #[test]
    fn env_prefix_replaces_separators() {
        assert_eq!(ProviderName::from("gate-io.v2").env_prefix(), "GATE_IO_V2");
    }

    #[test]
    fn blank_names_detected() {
        assert!(ProviderName::from("").is_blank());
        assert!(ProviderName::from("  ").is_blank());
        assert!(!ProviderName::from("kucoin").is_blank());
    }
}
