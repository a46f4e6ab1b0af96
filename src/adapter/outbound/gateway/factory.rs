//! Builds gateway connectors from configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::warn;

use super::connector::HttpConnector;
use crate::domain::{Credentials, ProviderName};
use crate::error::ConnectorError;
use crate::infrastructure::config::gateway::GatewayConfig;
use crate::port::{ConnectorFactory, ConnectorHandle};

/// Connector factory for every provider with a configured gateway.
///
/// One HTTP client (and its connection pool) is shared by all handles.
#[derive(Debug, Clone)]
pub struct HttpConnectorFactory {
    http: HttpClient,
    endpoints: BTreeMap<String, String>,
}

impl HttpConnectorFactory {
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        let endpoints = config
            .providers
            .iter()
            .map(|(name, provider)| (name.to_ascii_lowercase(), provider.base_url.clone()))
            .collect();
        Self { http, endpoints }
    }
}

impl ConnectorFactory for HttpConnectorFactory {
    fn build(
        &self,
        provider: &ProviderName,
        credentials: Option<&Credentials>,
    ) -> Result<ConnectorHandle, ConnectorError> {
        let key = provider.as_str().trim().to_ascii_lowercase();
        let base_url = self.endpoints.get(&key).ok_or_else(|| {
            ConnectorError::Other(format!("no gateway configured for provider '{provider}'"))
        })?;
        Ok(std::sync::Arc::new(HttpConnector::new(
            provider.clone(),
            self.http.clone(),
            base_url.clone(),
            credentials.cloned(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::gateway::GatewayProviderConfig;

    fn config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.providers.insert(
            "Binance".into(),
            GatewayProviderConfig {
                base_url: "http://127.0.0.1:9/binance".into(),
            },
        );
        config
    }

    #[test]
    fn builds_public_and_authenticated_handles() {
        let factory = HttpConnectorFactory::from_config(&config());
        let provider = ProviderName::from("binance");

        let public = factory.build(&provider, None).unwrap();
        assert!(!public.is_authenticated());
        assert_eq!(public.provider(), &provider);

        let creds = Credentials::from_parts(Some("k".into()), Some("s".into()), None).unwrap();
        let signed = factory.build(&provider, Some(&creds)).unwrap();
        assert!(signed.is_authenticated());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let factory = HttpConnectorFactory::from_config(&config());
        let err = factory.build(&ProviderName::from("kraken"), None).err();
        assert!(matches!(err, Some(ConnectorError::Other(_))));
    }

    #[tokio::test]
    async fn closed_handle_refuses_calls() {
        let factory = HttpConnectorFactory::from_config(&config());
        let handle = factory.build(&ProviderName::from("binance"), None).unwrap();
        handle.close().await;
        assert!(matches!(
            handle.load_markets().await,
            Err(ConnectorError::Other(_))
        ));
    }

    #[tokio::test]
    async fn public_handle_cannot_sign() {
        let factory = HttpConnectorFactory::from_config(&config());
        let handle = factory.build(&ProviderName::from("binance"), None).unwrap();
        assert!(handle.fetch_balance().await.unwrap_err().is_authentication());
    }
}
