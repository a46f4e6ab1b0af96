//! Mock connector implementations for testing.
//!
//! - [`ScriptedConnectorFactory`] - builds [`StubConnector`]s that pop their
//!   results from a shared [`ConnectorScript`] and count every call.
//!   Best for: initialization protocol, degraded mode, retry behavior.
//!
//! - [`StubConnector::handle`] - a standalone always-succeeding handle.
//!   Best for: cache and single-flight tests that only need identity.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{BalanceSnapshot, Credentials, ProviderName};
use crate::error::ConnectorError;
use crate::port::{ConnectorFactory, ConnectorHandle, ExchangeConnector};

// ---------------------------------------------------------------------------
// ConnectorScript
// ---------------------------------------------------------------------------

/// Scripted results and call counters shared by every connector a factory builds.
///
/// Each call pops the next result from the matching queue and falls back to
/// success when the queue is exhausted.
#[derive(Default)]
pub struct ConnectorScript {
    validate_results: Mutex<VecDeque<Result<bool, ConnectorError>>>,
    auth_load_results: Mutex<VecDeque<Result<(), ConnectorError>>>,
    public_load_results: Mutex<VecDeque<Result<(), ConnectorError>>>,
    balance_results: Mutex<VecDeque<Result<BalanceSnapshot, ConnectorError>>>,
    build_errors: Mutex<VecDeque<ConnectorError>>,
    load_delay: Mutex<Duration>,
    balance_delay: Mutex<Duration>,

    auth_builds: AtomicU32,
    public_builds: AtomicU32,
    validate_calls: AtomicU32,
    load_calls: AtomicU32,
    balance_calls: AtomicU32,
    closes: AtomicU32,
}

impl ConnectorScript {
    pub fn push_validate(&self, result: Result<bool, ConnectorError>) {
        self.validate_results.lock().push_back(result);
    }

    /// Queue a `load_markets` result for authenticated handles.
    pub fn push_auth_load(&self, result: Result<(), ConnectorError>) {
        self.auth_load_results.lock().push_back(result);
    }

    /// Queue a `load_markets` result for public handles.
    pub fn push_public_load(&self, result: Result<(), ConnectorError>) {
        self.public_load_results.lock().push_back(result);
    }

    /// Queue the same `load_markets` failure for both handle kinds, `times` times.
    pub fn fail_loads(&self, error: ConnectorError, times: usize) {
        for _ in 0..times {
            self.push_auth_load(Err(error.clone()));
            self.push_public_load(Err(error.clone()));
        }
    }

    pub fn push_balance(&self, result: Result<BalanceSnapshot, ConnectorError>) {
        self.balance_results.lock().push_back(result);
    }

    pub fn push_build_error(&self, error: ConnectorError) {
        self.build_errors.lock().push_back(error);
    }

    /// Make every `load_markets` call take `delay`.
    pub fn set_load_delay(&self, delay: Duration) {
        *self.load_delay.lock() = delay;
    }

    /// Make every `fetch_balance` call take `delay`.
    pub fn set_balance_delay(&self, delay: Duration) {
        *self.balance_delay.lock() = delay;
    }

    /// Total connectors built, authenticated and public.
    pub fn builds(&self) -> u32 {
        self.auth_builds() + self.public_builds()
    }

    pub fn auth_builds(&self) -> u32 {
        self.auth_builds.load(Ordering::SeqCst)
    }

    pub fn public_builds(&self) -> u32 {
        self.public_builds.load(Ordering::SeqCst)
    }

    pub fn validate_calls(&self) -> u32 {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn load_calls(&self) -> u32 {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn balance_calls(&self) -> u32 {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> u32 {
        self.closes.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// StubConnector
// ---------------------------------------------------------------------------

/// Connector whose results come from a [`ConnectorScript`].
pub struct StubConnector {
    provider: ProviderName,
    authenticated: bool,
    script: Arc<ConnectorScript>,
    closed: AtomicBool,
}

impl StubConnector {
    pub fn new(provider: ProviderName, authenticated: bool, script: Arc<ConnectorScript>) -> Self {
        Self {
            provider,
            authenticated,
            script,
            closed: AtomicBool::new(false),
        }
    }

    /// A standalone handle with an empty (always succeeding) script.
    pub fn handle(provider: &str, authenticated: bool) -> ConnectorHandle {
        Arc::new(Self::new(
            ProviderName::from(provider),
            authenticated,
            Arc::new(ConnectorScript::default()),
        ))
    }
}

#[async_trait]
impl ExchangeConnector for StubConnector {
    fn provider(&self) -> &ProviderName {
        &self.provider
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn validate_credentials(&self) -> Result<bool, ConnectorError> {
        self.script.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .validate_results
            .lock()
            .pop_front()
            .unwrap_or(Ok(true))
    }

    async fn load_markets(&self) -> Result<(), ConnectorError> {
        self.script.load_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.script.load_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let queue = if self.authenticated {
            &self.script.auth_load_results
        } else {
            &self.script.public_load_results
        };
        let result = queue.lock().pop_front();
        result.unwrap_or(Ok(()))
    }

    async fn fetch_balance(&self) -> Result<BalanceSnapshot, ConnectorError> {
        self.script.balance_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.script.balance_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let result = self.script.balance_results.lock().pop_front();
        result.unwrap_or_else(|| Ok(sample_balance()))
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.script.closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Balance returned when no balance result is scripted.
pub fn sample_balance() -> BalanceSnapshot {
    let mut snapshot = BalanceSnapshot::default();
    snapshot.totals.insert("USDT".into(), Decimal::new(100_000, 2));
    snapshot.totals.insert("BTC".into(), Decimal::ZERO);
    snapshot
}

// ---------------------------------------------------------------------------
// ScriptedConnectorFactory
// ---------------------------------------------------------------------------

/// Factory producing [`StubConnector`]s that share one script.
#[derive(Clone, Default)]
pub struct ScriptedConnectorFactory {
    script: Arc<ConnectorScript>,
}

impl ScriptedConnectorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self) -> &ConnectorScript {
        &self.script
    }
}

impl ConnectorFactory for ScriptedConnectorFactory {
    fn build(
        &self,
        provider: &ProviderName,
        credentials: Option<&Credentials>,
    ) -> Result<ConnectorHandle, ConnectorError> {
        if let Some(error) = self.script.build_errors.lock().pop_front() {
            return Err(error);
        }
        let authenticated = credentials.is_some();
        if authenticated {
            self.script.auth_builds.fetch_add(1, Ordering::SeqCst);
        } else {
            self.script.public_builds.fetch_add(1, Ordering::SeqCst);
        }
        Ok(Arc::new(StubConnector::new(
            provider.clone(),
            authenticated,
            Arc::clone(&self.script),
        )))
    }
}
