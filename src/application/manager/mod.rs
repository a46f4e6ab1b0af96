//! Exchange connectivity manager.
//!
//! [`ExchangeManager`] owns the lifecycle of exchange connectors: it resolves
//! the active provider, connects through the [`InitializationCoordinator`],
//! caches the resulting handles and exposes credential testing and teardown.
//! It is an explicitly constructed value; clone it to share it between tasks.
//!
//! A `None` handle from any start operation means "exchange features
//! degraded", never a fatal error.

mod ban_ledger;
mod cache;
mod coordinator;
mod flight;
mod resolver;

pub use ban_ledger::BanLedger;
pub use cache::{ConnectionCache, ConnectionEntry};
pub use coordinator::{InitializationCoordinator, RetryPolicy};
pub use flight::SingleFlight;
pub use resolver::ProviderResolver;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::{AttemptState, CredentialFailure, CredentialTestOutcome, ProviderName};
use crate::error::{Error, Result};
use crate::infrastructure::config::manager::ManagerConfig;
use crate::port::{
    BanStore, Clock, ConnectorFactory, ConnectorHandle, CredentialSource, ProviderCatalog,
};

const COMPONENT: &str = "exchange_manager";

/// Collaborators the manager drives.
#[derive(Clone)]
pub struct ManagerDeps {
    pub factory: Arc<dyn ConnectorFactory>,
    pub credentials: Arc<dyn CredentialSource>,
    pub ban_store: Arc<dyn BanStore>,
    pub catalog: Arc<dyn ProviderCatalog>,
    pub clock: Arc<dyn Clock>,
}

/// Resolved active provider and the handle started for it.
#[derive(Default)]
struct ActiveState {
    provider: Option<ProviderName>,
    handle: Option<ConnectorHandle>,
}

struct Inner {
    config: ManagerConfig,
    factory: Arc<dyn ConnectorFactory>,
    credentials: Arc<dyn CredentialSource>,
    ledger: Arc<BanLedger>,
    cache: Arc<ConnectionCache>,
    coordinator: InitializationCoordinator,
    resolver: ProviderResolver,
    flight: Arc<SingleFlight>,
    active: Mutex<ActiveState>,
}

/// Process-wide exchange connectivity registry.
#[derive(Clone)]
pub struct ExchangeManager {
    inner: Arc<Inner>,
}

impl ExchangeManager {
    pub fn new(config: ManagerConfig, deps: ManagerDeps) -> Self {
        let ledger = Arc::new(BanLedger::new(
            deps.ban_store,
            Arc::clone(&deps.clock),
            config.ban_key.clone(),
        ));
        let cache = Arc::new(ConnectionCache::new());
        let coordinator = InitializationCoordinator::new(
            Arc::clone(&deps.factory),
            Arc::clone(&deps.credentials),
            Arc::clone(&ledger),
            Arc::clone(&cache),
            deps.clock,
            RetryPolicy::from(&config),
        );

        Self {
            inner: Arc::new(Inner {
                config,
                factory: deps.factory,
                credentials: deps.credentials,
                ledger,
                cache,
                coordinator,
                resolver: ProviderResolver::new(deps.catalog),
                flight: Arc::new(SingleFlight::new()),
                active: Mutex::new(ActiveState::default()),
            }),
        }
    }

    /// Connect to the active provider.
    ///
    /// Concurrent callers share one initialization and all observe its
    /// outcome. Returns `None` while banned, when no provider is active, or
    /// when the connection could not be established.
    pub async fn start_exchange(&self) -> Option<ConnectorHandle> {
        if self.inner.ledger.is_banned().await {
            info!(component = COMPONENT, "Connection attempts are banned");
            return None;
        }

        if let Some(handle) = self.active_handle() {
            return Some(handle);
        }

        let inner = Arc::clone(&self.inner);
        self.inner
            .flight
            .join_or_start(move || async move { inner.initialize_active().await })
            .await
    }

    /// Connect to an explicit provider, bypassing active-provider resolution.
    ///
    /// Calls for different providers run independently.
    pub async fn start_exchange_provider(
        &self,
        provider: &ProviderName,
    ) -> Option<ConnectorHandle> {
        if provider.is_blank() {
            warn!(
                component = COMPONENT,
                "Ignoring start request for empty provider name"
            );
            return None;
        }
        self.inner.coordinator.initialize(provider).await
    }

    /// Evict the cached connector for `provider` and close it.
    ///
    /// Also clears the active handle when `provider` is the active provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `provider` is empty.
    pub async fn remove_exchange(&self, provider: &ProviderName) -> Result<()> {
        if provider.is_blank() {
            return Err(Error::InvalidArgument(
                "provider name must not be empty".to_string(),
            ));
        }

        let evicted = self.inner.cache.remove(provider);
        {
            let mut active = self.inner.active.lock();
            if active.provider.as_ref() == Some(provider) {
                active.handle = None;
            }
        }

        match evicted {
            Some(entry) => {
                entry.handle.close().await;
                info!(component = COMPONENT, provider = %provider, "Exchange connector removed");
            }
            None => {
                debug!(
                    component = COMPONENT,
                    provider = %provider,
                    "No cached connector to remove"
                );
            }
        }
        Ok(())
    }

    /// The active provider, resolved from the catalog on first use.
    ///
    /// A successful resolution is kept until [`refresh_provider`](Self::refresh_provider).
    pub async fn get_provider(&self) -> Option<ProviderName> {
        self.inner.provider().await
    }

    /// Forget the resolved active provider and its handle.
    ///
    /// The next [`start_exchange`](Self::start_exchange) resolves again; the
    /// previous provider's connector stays cached under its own name.
    pub fn refresh_provider(&self) {
        let mut active = self.inner.active.lock();
        active.provider = None;
        active.handle = None;
    }

    /// Check `provider`'s credentials with a fresh, uncached connector.
    ///
    /// Loads markets and fetches the balance within the configured timeout,
    /// then closes the connector. Never touches the connection cache or the
    /// attempt counters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `provider` is empty. Every other
    /// failure is reported through the returned outcome.
    pub async fn test_exchange_credentials(
        &self,
        provider: &ProviderName,
    ) -> Result<CredentialTestOutcome> {
        if provider.is_blank() {
            return Err(Error::InvalidArgument(
                "provider name must not be empty".to_string(),
            ));
        }

        if self.inner.ledger.is_banned().await {
            info!(
                component = COMPONENT,
                provider = %provider,
                "Credential test skipped, connection attempts are banned"
            );
            return Ok(CredentialTestOutcome::failure(CredentialFailure::RateLimited));
        }

        let Some(credentials) = self.inner.credentials.credentials(provider) else {
            return Ok(CredentialTestOutcome::failure(
                CredentialFailure::NotConfigured,
            ));
        };

        let handle = match self.inner.factory.build(provider, Some(&credentials)) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(
                    component = COMPONENT,
                    provider = %provider,
                    error = %e,
                    "Failed to build connector for credential test"
                );
                return Ok(CredentialTestOutcome::from_error(&e));
            }
        };

        let limit = self.inner.config.credential_test_timeout();
        let result = timeout(limit, async {
            handle.load_markets().await?;
            handle.fetch_balance().await
        })
        .await;
        handle.close().await;

        let outcome = match result {
            Ok(Ok(balance)) => CredentialTestOutcome::success(balance.non_zero()),
            Ok(Err(e)) => {
                warn!(
                    component = COMPONENT,
                    provider = %provider,
                    error = %e,
                    "Credential test failed"
                );
                CredentialTestOutcome::from_error(&e)
            }
            Err(_) => {
                warn!(
                    component = COMPONENT,
                    provider = %provider,
                    timeout_secs = limit.as_secs(),
                    "Credential test timed out"
                );
                CredentialTestOutcome::failure(CredentialFailure::Network)
            }
        };
        Ok(outcome)
    }

    /// Close the active connector and clear the active-handle reference.
    ///
    /// The active provider's cache entry goes with it; other cached providers
    /// are left alone.
    pub async fn stop_exchange(&self) {
        let (provider, handle) = {
            let mut active = self.inner.active.lock();
            (active.provider.clone(), active.handle.take())
        };

        let Some(handle) = handle else {
            debug!(component = COMPONENT, "No active connector to stop");
            return;
        };
        if let Some(provider) = &provider {
            self.inner.cache.remove_if_same(provider, &handle);
        }
        handle.close().await;
        let name = provider.map(|p| p.to_string()).unwrap_or_default();
        info!(component = COMPONENT, provider = %name, "Active exchange connector stopped");
    }

    /// Handle started for the active provider, if any.
    #[must_use]
    pub fn active_handle(&self) -> Option<ConnectorHandle> {
        self.inner.active.lock().handle.clone()
    }

    /// Providers with a cached connector.
    #[must_use]
    pub fn cached_providers(&self) -> Vec<ProviderName> {
        self.inner.cache.providers()
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.inner.cache.len()
    }

    /// Failure counters recorded for `provider`.
    #[must_use]
    pub fn attempt_state(&self, provider: &ProviderName) -> AttemptState {
        self.inner.cache.attempt_state(provider)
    }

    /// True while an active-provider initialization is running.
    #[must_use]
    pub fn is_initializing(&self) -> bool {
        self.inner.flight.in_flight()
    }
}

impl Inner {
    async fn provider(&self) -> Option<ProviderName> {
        let cached = self.active.lock().provider.clone();
        if cached.is_some() {
            return cached;
        }

        let resolved = self.resolver.fetch_active_provider().await?;
        let mut active = self.active.lock();
        Some(active.provider.get_or_insert(resolved).clone())
    }

    async fn initialize_active(&self) -> Option<ConnectorHandle> {
        let Some(provider) = self.provider().await else {
            warn!(component = COMPONENT, "No active exchange provider");
            return None;
        };

        let handle = self.coordinator.initialize(&provider).await?;

        let mut active = self.active.lock();
        if active.provider.as_ref() == Some(&provider) {
            active.handle = Some(ConnectorHandle::clone(&handle));
        }
        Some(handle)
    }
}
