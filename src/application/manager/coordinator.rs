//! Initialization protocol for a single provider.
//!
//! [`InitializationCoordinator::initialize`] runs as a bounded loop. Each
//! round re-checks the ban, the cache and the circuit breaker before making
//! one connection attempt:
//!
//! 1. ban active → `None`
//! 2. cached handle → that handle
//! 3. circuit open → `None`
//! 4. attempt: missing credentials → `None` (not retried); rate limited →
//!    ban, sleep, next round; other failure → count it, sleep and retry
//!    while the retry budget and the circuit allow.
//!
//! An attempt builds an authenticated connector, degrades to a public one if
//! the credentials are rejected or the authenticated market load fails, and
//! succeeds once markets load.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::domain::{CircuitPolicy, ProviderName};
use crate::error::ConnectorError;
use crate::infrastructure::config::manager::ManagerConfig;
use crate::port::{Clock, ConnectorFactory, ConnectorHandle, CredentialSource};

use super::ban_ledger::BanLedger;
use super::cache::ConnectionCache;

const COMPONENT: &str = "initialization_coordinator";

/// Retry and backoff parameters.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub retry_budget: u32,
    pub retry_delay: Duration,
    pub circuit: CircuitPolicy,
    pub rate_limit_ban: Duration,
    pub rate_limit_retries: u32,
}

impl From<&ManagerConfig> for RetryPolicy {
    fn from(config: &ManagerConfig) -> Self {
        Self {
            retry_budget: config.retry_budget,
            retry_delay: config.retry_delay(),
            circuit: config.circuit_policy(),
            rate_limit_ban: config.rate_limit_ban(),
            rate_limit_retries: config.rate_limit_retries,
        }
    }
}

/// Result of one connection attempt.
enum Attempt {
    Connected(ConnectorHandle),
    MissingCredentials,
    RateLimited(ConnectorError),
    Failed(ConnectorError),
}

pub struct InitializationCoordinator {
    factory: Arc<dyn ConnectorFactory>,
    credentials: Arc<dyn CredentialSource>,
    ledger: Arc<BanLedger>,
    cache: Arc<ConnectionCache>,
    clock: Arc<dyn Clock>,
    policy: RetryPolicy,
}

impl InitializationCoordinator {
    pub fn new(
        factory: Arc<dyn ConnectorFactory>,
        credentials: Arc<dyn CredentialSource>,
        ledger: Arc<BanLedger>,
        cache: Arc<ConnectionCache>,
        clock: Arc<dyn Clock>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            factory,
            credentials,
            ledger,
            cache,
            clock,
            policy,
        }
    }

    /// Obtain a connector for `provider`, connecting if it is not cached.
    ///
    /// Never returns an error: every failure degrades, backs off and retries,
    /// or resolves to `None`, which callers treat as "temporarily unavailable".
    pub async fn initialize(&self, provider: &ProviderName) -> Option<ConnectorHandle> {
        let mut retries_remaining = self.policy.retry_budget;
        let mut rate_limit_rounds = 0u32;

        loop {
            if self.ledger.is_banned().await {
                info!(
                    component = COMPONENT,
                    provider = %provider,
                    "Connection attempts are banned, skipping initialization"
                );
                return None;
            }

            if let Some(handle) = self.cache.get(provider) {
                debug!(component = COMPONENT, provider = %provider, "Using cached connector");
                return Some(handle);
            }

            if self
                .cache
                .is_circuit_open(provider, self.clock.now(), &self.policy.circuit)
            {
                let state = self.cache.attempt_state(provider);
                warn!(
                    component = COMPONENT,
                    provider = %provider,
                    attempts = state.attempt_count,
                    "Circuit breaker open, not attempting connection"
                );
                return None;
            }

            match self.attempt(provider).await {
                Attempt::Connected(handle) => {
                    self.cache
                        .insert(provider.clone(), ConnectorHandle::clone(&handle), self.clock.now());
                    self.cache.reset_attempts(provider);
                    info!(
                        component = COMPONENT,
                        provider = %provider,
                        authenticated = handle.is_authenticated(),
                        "Exchange connector initialized"
                    );
                    return Some(handle);
                }
                Attempt::MissingCredentials => {
                    let state = self.cache.record_failure(provider, self.clock.now());
                    error!(
                        component = COMPONENT,
                        provider = %provider,
                        env_prefix = %format!("APP_{}_API_", provider.env_prefix()),
                        attempts = state.attempt_count,
                        "API credentials missing or empty, not connecting"
                    );
                    return None;
                }
                Attempt::RateLimited(e) => {
                    if rate_limit_rounds >= self.policy.rate_limit_retries {
                        let state = self.cache.record_failure(provider, self.clock.now());
                        error!(
                            component = COMPONENT,
                            provider = %provider,
                            error = %e,
                            attempts = state.attempt_count,
                            "Still rate limited after backing off, giving up"
                        );
                        return None;
                    }
                    rate_limit_rounds += 1;
                    let ban = self.ledger.impose(self.policy.rate_limit_ban).await;
                    warn!(
                        component = COMPONENT,
                        provider = %provider,
                        error = %e,
                        banned_until = %ban.banned_until,
                        round = rate_limit_rounds,
                        "Rate limited by exchange, backing off"
                    );
                    sleep(self.policy.rate_limit_ban).await;
                }
                Attempt::Failed(e) => {
                    let now = self.clock.now();
                    let state = self.cache.record_failure(provider, now);
                    let circuit_open = state.is_circuit_open(now, &self.policy.circuit);
                    if retries_remaining == 0 || circuit_open {
                        error!(
                            component = COMPONENT,
                            provider = %provider,
                            error = %e,
                            attempts = state.attempt_count,
                            circuit_open,
                            "Exchange initialization failed"
                        );
                        return None;
                    }
                    retries_remaining -= 1;
                    warn!(
                        component = COMPONENT,
                        provider = %provider,
                        error = %e,
                        attempts = state.attempt_count,
                        retries_remaining,
                        delay_secs = self.policy.retry_delay.as_secs(),
                        "Exchange initialization failed, retrying"
                    );
                    sleep(self.policy.retry_delay).await;
                }
            }
        }
    }

    /// One connection attempt: build, validate, load markets.
    async fn attempt(&self, provider: &ProviderName) -> Attempt {
        let Some(credentials) = self.credentials.credentials(provider) else {
            return Attempt::MissingCredentials;
        };

        let handle = match self.factory.build(provider, Some(&credentials)) {
            Ok(handle) => handle,
            Err(e) => return Attempt::Failed(e),
        };

        let handle = match handle.validate_credentials().await {
            Ok(true) => handle,
            Ok(false) => {
                warn!(
                    component = COMPONENT,
                    provider = %provider,
                    "API credentials rejected, falling back to public market data"
                );
                handle.close().await;
                match self.factory.build(provider, None) {
                    Ok(public) => public,
                    Err(e) => return Attempt::Failed(e),
                }
            }
            Err(e) if e.is_rate_limit() => {
                handle.close().await;
                return Attempt::RateLimited(e);
            }
            Err(e) => {
                warn!(
                    component = COMPONENT,
                    provider = %provider,
                    error = %e,
                    "Credential validation failed, falling back to public market data"
                );
                handle.close().await;
                match self.factory.build(provider, None) {
                    Ok(public) => public,
                    Err(e) => return Attempt::Failed(e),
                }
            }
        };

        match handle.load_markets().await {
            Ok(()) => Attempt::Connected(handle),
            Err(e) if e.is_rate_limit() => {
                handle.close().await;
                Attempt::RateLimited(e)
            }
            Err(e) if handle.is_authenticated() => {
                warn!(
                    component = COMPONENT,
                    provider = %provider,
                    error = %e,
                    "Failed to load markets, retrying with public connector"
                );
                handle.close().await;
                let public = match self.factory.build(provider, None) {
                    Ok(public) => public,
                    Err(e) => return Attempt::Failed(e),
                };
                match public.load_markets().await {
                    Ok(()) => Attempt::Connected(public),
                    Err(e) => {
                        public.close().await;
                        if e.is_rate_limit() {
                            Attempt::RateLimited(e)
                        } else {
                            Attempt::Failed(e)
                        }
                    }
                }
            }
            Err(e) => {
                handle.close().await;
                Attempt::Failed(e)
            }
        }
    }
}
