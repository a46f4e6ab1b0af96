//! Connection cache and per-provider attempt counters.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{AttemptState, CircuitPolicy, ProviderName};
use crate::port::outbound::exchange::{same_handle, ConnectorHandle};

/// A materialized connector owned by the cache.
#[derive(Clone)]
pub struct ConnectionEntry {
    pub provider: ProviderName,
    pub handle: ConnectorHandle,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for ConnectionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionEntry")
            .field("provider", &self.provider)
            .field("authenticated", &self.handle.is_authenticated())
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// In-memory map from provider to live connector plus failure counters.
///
/// No method holds a map guard past its return, so callers may await freely
/// between calls.
#[derive(Debug, Default)]
pub struct ConnectionCache {
    entries: DashMap<ProviderName, ConnectionEntry>,
    attempts: DashMap<ProviderName, AttemptState>,
}

impl ConnectionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle for `provider`.
    #[must_use]
    pub fn get(&self, provider: &ProviderName) -> Option<ConnectorHandle> {
        self.entries
            .get(provider)
            .map(|entry| ConnectorHandle::clone(&entry.handle))
    }

    /// Store a handle, returning the entry it replaced.
    pub fn insert(
        &self,
        provider: ProviderName,
        handle: ConnectorHandle,
        created_at: DateTime<Utc>,
    ) -> Option<ConnectionEntry> {
        self.entries.insert(
            provider.clone(),
            ConnectionEntry {
                provider,
                handle,
                created_at,
            },
        )
    }

    /// Evict the entry for `provider`.
    pub fn remove(&self, provider: &ProviderName) -> Option<ConnectionEntry> {
        self.entries.remove(provider).map(|(_, entry)| entry)
    }

    /// Evict the entry for `provider` only if it still holds `handle`.
    pub fn remove_if_same(
        &self,
        provider: &ProviderName,
        handle: &ConnectorHandle,
    ) -> Option<ConnectionEntry> {
        self.entries
            .remove_if(provider, |_, entry| same_handle(&entry.handle, handle))
            .map(|(_, entry)| entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Providers with a cached connector, sorted by name.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderName> {
        let mut providers: Vec<_> = self.entries.iter().map(|e| e.key().clone()).collect();
        providers.sort();
        providers
    }

    /// Current attempt counters for `provider`.
    #[must_use]
    pub fn attempt_state(&self, provider: &ProviderName) -> AttemptState {
        self.attempts
            .get(provider)
            .map(|state| *state)
            .unwrap_or_default()
    }

    /// Count a failed attempt and return the updated counters.
    pub fn record_failure(&self, provider: &ProviderName, now: DateTime<Utc>) -> AttemptState {
        let mut state = self.attempts.entry(provider.clone()).or_default();
        state.record_failure(now);
        *state
    }

    pub fn reset_attempts(&self, provider: &ProviderName) {
        self.attempts.remove(provider);
    }

    #[must_use]
    pub fn is_circuit_open(
        &self,
        provider: &ProviderName,
        now: DateTime<Utc>,
        policy: &CircuitPolicy,
    ) -> bool {
        self.attempt_state(provider).is_circuit_open(now, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::connector::StubConnector;

    fn handle(name: &str) -> ConnectorHandle {
        StubConnector::handle(name, true)
    }

    #[test]
    fn insert_then_get_returns_same_handle() {
        let cache = ConnectionCache::new();
        let provider = ProviderName::from("binance");
        let h = handle("binance");
        cache.insert(provider.clone(), ConnectorHandle::clone(&h), Utc::now());

        let cached = cache.get(&provider).unwrap();
        assert!(same_handle(&cached, &h));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn remove_if_same_ignores_replaced_entry() {
        let cache = ConnectionCache::new();
        let provider = ProviderName::from("okx");
        let old = handle("okx");
        cache.insert(provider.clone(), ConnectorHandle::clone(&old), Utc::now());
        cache.insert(provider.clone(), handle("okx"), Utc::now());

        assert!(cache.remove_if_same(&provider, &old).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn record_failure_accumulates_until_reset() {
        let cache = ConnectionCache::new();
        let provider = ProviderName::from("kraken");
        let now = Utc::now();
        cache.record_failure(&provider, now);
        let state = cache.record_failure(&provider, now);
        assert_eq!(state.attempt_count, 2);
        assert_eq!(state.last_attempt_at, Some(now));

        cache.reset_attempts(&provider);
        assert_eq!(cache.attempt_state(&provider).attempt_count, 0);
    }

    #[test]
    fn providers_sorted() {
        let cache = ConnectionCache::new();
        for name in ["okx", "binance", "kraken"] {
            cache.insert(ProviderName::from(name), handle(name), Utc::now());
        }
        let names: Vec<_> = cache.providers().iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["binance", "kraken", "okx"]);
    }
}
