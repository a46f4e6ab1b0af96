//! HTTP status and transport error classification.

use reqwest::StatusCode;

use crate::error::ConnectorError;

/// Map a non-success gateway status to a connector error category.
#[must_use]
pub fn classify_status(status: StatusCode, body: &str) -> ConnectorError {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{status}: {}", body.trim())
    };
    match status.as_u16() {
        401 => ConnectorError::Authentication(detail),
        403 => ConnectorError::PermissionDenied(detail),
        418 | 429 => ConnectorError::RateLimited(detail),
        502..=504 => ConnectorError::Unavailable(detail),
        _ => ConnectorError::Other(detail),
    }
}

/// Map a transport failure. Timeouts and connection errors are network
/// failures; body decoding errors are not.
pub(super) fn classify_transport(err: &reqwest::Error) -> ConnectorError {
    if err.is_decode() {
        ConnectorError::Other(format!("invalid gateway response: {err}"))
    } else {
        ConnectorError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_auth_statuses() {
        assert!(classify_status(StatusCode::UNAUTHORIZED, "").is_authentication());
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "ip not whitelisted"),
            ConnectorError::PermissionDenied(msg) if msg.contains("ip not whitelisted")
        ));
    }

    #[test]
    fn maps_throttling_statuses() {
        assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, "").is_rate_limit());
        assert!(classify_status(StatusCode::IM_A_TEAPOT, "").is_rate_limit());
    }

    #[test]
    fn maps_gateway_outages() {
        for status in [
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ] {
            assert!(matches!(
                classify_status(status, ""),
                ConnectorError::Unavailable(_)
            ));
        }
    }

    #[test]
    fn other_statuses_fall_through() {
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, ""),
            ConnectorError::Other(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, ""),
            ConnectorError::Other(_)
        ));
    }
}
