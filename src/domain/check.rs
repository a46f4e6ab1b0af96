//! Result of a credential test against a provider.

use serde::Serialize;

use super::balance::BalanceSnapshot;
use crate::error::ConnectorError;

/// Why a credential test failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialFailure {
    NotConfigured,
    Authentication,
    Network,
    Unavailable,
    RateLimited,
    PermissionDenied,
    Other,
}

impl CredentialFailure {
    /// Operator-facing explanation for this failure class.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotConfigured => "API credentials are not configured for this exchange",
            Self::Authentication => {
                "Invalid API credentials. Please check your API key, secret and passphrase"
            }
            Self::Network => "Network error. Please check your connection and try again",
            Self::Unavailable => "Exchange is currently unavailable. Please try again later",
            Self::RateLimited => "Rate limit exceeded. Please wait a moment and try again",
            Self::PermissionDenied => {
                "API key lacks the required permissions. Please enable read access"
            }
            Self::Other => "Failed to connect to the exchange",
        }
    }
}

impl From<&ConnectorError> for CredentialFailure {
    fn from(err: &ConnectorError) -> Self {
        match err {
            ConnectorError::Authentication(_) => Self::Authentication,
            ConnectorError::RateLimited(_) => Self::RateLimited,
            ConnectorError::Network(_) => Self::Network,
            ConnectorError::Unavailable(_) => Self::Unavailable,
            ConnectorError::PermissionDenied(_) => Self::PermissionDenied,
            ConnectorError::Other(_) => Self::Other,
        }
    }
}

/// Structured outcome of `test_exchange_credentials`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialTestOutcome {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CredentialFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<BalanceSnapshot>,
}

impl CredentialTestOutcome {
    pub const SUCCESS_MESSAGE: &'static str = "API credentials are valid and connection successful";

    pub fn success(balance: BalanceSnapshot) -> Self {
        Self {
            status: true,
            message: Self::SUCCESS_MESSAGE.to_string(),
            failure: None,
            balance: Some(balance),
        }
    }

    pub fn failure(kind: CredentialFailure) -> Self {
        Self {
            status: false,
            message: kind.message().to_string(),
            failure: Some(kind),
            balance: None,
        }
    }

    /// Failure carrying the connector's own detail for unclassified errors.
    pub fn from_error(err: &ConnectorError) -> Self {
        let kind = CredentialFailure::from(err);
        let mut outcome = Self::failure(kind);
        if let ConnectorError::Other(detail) = err {
            outcome.message = format!("{}: {detail}", kind.message());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_error_class() {
        let cases = [
            (ConnectorError::Authentication("x".into()), CredentialFailure::Authentication),
            (ConnectorError::RateLimited("x".into()), CredentialFailure::RateLimited),
            (ConnectorError::Network("x".into()), CredentialFailure::Network),
            (ConnectorError::Unavailable("x".into()), CredentialFailure::Unavailable),
            (ConnectorError::PermissionDenied("x".into()), CredentialFailure::PermissionDenied),
            (ConnectorError::Other("x".into()), CredentialFailure::Other),
        ];
        for (err, expected) in cases {
            let outcome = CredentialTestOutcome::from_error(&err);
            assert!(!outcome.status);
            assert_eq!(outcome.failure, Some(expected));
        }
    }

    #[test]
    fn generic_failure_keeps_detail() {
        let outcome = CredentialTestOutcome::from_error(&ConnectorError::Other("boom".into()));
        assert!(outcome.message.ends_with(": boom"));
    }

    #[test]
    fn success_message() {
        let outcome = CredentialTestOutcome::success(BalanceSnapshot::default());
        assert!(outcome.status);
        assert_eq!(outcome.message, "API credentials are valid and connection successful");
    }
}
