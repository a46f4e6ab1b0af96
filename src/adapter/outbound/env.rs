//! Environment-variable credential source.
//!
//! Reads `APP_<PROVIDER>_API_KEY`, `APP_<PROVIDER>_API_SECRET` and the
//! optional `APP_<PROVIDER>_API_PASSPHRASE` at call time, so credentials
//! rotated in the environment are picked up on the next connection attempt.

use crate::domain::{Credentials, ProviderName};
use crate::port::CredentialSource;

/// Credential source over the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentialSource;

impl EnvCredentialSource {
    /// Name of the environment variable holding `field` for `provider`.
    #[must_use]
    pub fn variable(provider: &ProviderName, field: &str) -> String {
        format!("APP_{}_API_{field}", provider.env_prefix())
    }

    fn read(provider: &ProviderName, field: &str) -> Option<String> {
        std::env::var(Self::variable(provider, field)).ok()
    }
}

impl CredentialSource for EnvCredentialSource {
    fn credentials(&self, provider: &ProviderName) -> Option<Credentials> {
        Credentials::from_parts(
            Self::read(provider, "KEY"),
            Self::read(provider, "SECRET"),
            Self::read(provider, "PASSPHRASE"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_names_follow_convention() {
        let provider = ProviderName::from("kucoin");
        assert_eq!(
            EnvCredentialSource::variable(&provider, "KEY"),
            "APP_KUCOIN_API_KEY"
        );
        assert_eq!(
            EnvCredentialSource::variable(&provider, "PASSPHRASE"),
            "APP_KUCOIN_API_PASSPHRASE"
        );
    }

    #[test]
    fn reads_complete_credentials() {
        std::env::set_var("APP_ENVTEST_COMPLETE_API_KEY", "k");
        std::env::set_var("APP_ENVTEST_COMPLETE_API_SECRET", "s");
        let creds = EnvCredentialSource
            .credentials(&ProviderName::from("envtest_complete"))
            .unwrap();
        assert_eq!(creds.api_key(), "k");
        assert_eq!(creds.passphrase(), None);
    }

    #[test]
    fn empty_key_is_missing() {
        std::env::set_var("APP_ENVTEST_EMPTY_API_KEY", "");
        std::env::set_var("APP_ENVTEST_EMPTY_API_SECRET", "s");
        assert!(EnvCredentialSource
            .credentials(&ProviderName::from("envtest_empty"))
            .is_none());
    }
}
