//! Connector handle over the REST gateway.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use tracing::debug;

use super::status::{classify_status, classify_transport};
use crate::domain::{BalanceSnapshot, Credentials, ProviderName};
use crate::error::ConnectorError;
use crate::port::ExchangeConnector;

/// One gateway session for a provider, optionally authenticated.
pub struct HttpConnector {
    provider: ProviderName,
    http: HttpClient,
    base_url: String,
    credentials: Option<Credentials>,
    markets: AtomicUsize,
    closed: AtomicBool,
}

impl HttpConnector {
    #[must_use]
    pub fn new(
        provider: ProviderName,
        http: HttpClient,
        base_url: impl Into<String>,
        credentials: Option<Credentials>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            provider,
            http,
            base_url,
            credentials,
            markets: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of markets seen by the last successful `load_markets`.
    #[must_use]
    pub fn market_count(&self) -> usize {
        self.markets.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), ConnectorError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ConnectorError::Other(format!(
                "connector for {} is closed",
                self.provider
            )));
        }
        Ok(())
    }

    fn signed(&self, path: &str) -> Result<RequestBuilder, ConnectorError> {
        let creds = self.credentials.as_ref().ok_or_else(|| {
            ConnectorError::Authentication(format!("{} handle has no credentials", self.provider))
        })?;
        let mut request = self
            .http
            .get(format!("{}{path}", self.base_url))
            .header("X-API-KEY", creds.api_key())
            .header("X-API-SECRET", creds.api_secret());
        if let Some(passphrase) = creds.passphrase() {
            request = request.header("X-API-PASSPHRASE", passphrase);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ConnectorError> {
        let response = request
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(provider = %self.provider, %status, "Gateway request rejected");
        Err(classify_status(status, &body))
    }
}

#[async_trait]
impl ExchangeConnector for HttpConnector {
    fn provider(&self) -> &ProviderName {
        &self.provider
    }

    fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    async fn validate_credentials(&self) -> Result<bool, ConnectorError> {
        self.ensure_open()?;
        let request = self.signed("/account")?;
        match self.send(request).await {
            Ok(_) => Ok(true),
            Err(ConnectorError::Authentication(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn load_markets(&self) -> Result<(), ConnectorError> {
        self.ensure_open()?;
        let request = self.http.get(format!("{}/markets", self.base_url));
        let markets: Vec<serde_json::Value> = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| classify_transport(&e))?;
        self.markets.store(markets.len(), Ordering::Release);
        debug!(provider = %self.provider, count = markets.len(), "Loaded markets");
        Ok(())
    }

    async fn fetch_balance(&self) -> Result<BalanceSnapshot, ConnectorError> {
        self.ensure_open()?;
        let request = self.signed("/account/balance")?;
        self.send(request)
            .await?
            .json::<BalanceSnapshot>()
            .await
            .map_err(|e| classify_transport(&e))
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(provider = %self.provider, "Gateway connector closed");
        }
    }
}

impl std::fmt::Debug for HttpConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnector")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("authenticated", &self.credentials.is_some())
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}
