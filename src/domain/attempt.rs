//! Per-provider failure counters and the circuit breaker built on them.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Threshold and cool-down window for the per-provider circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitPolicy {
    /// Failed attempts that open the circuit.
    pub threshold: u32,
    /// How long the circuit stays open after the most recent failure.
    pub window: Duration,
}

impl Default for CircuitPolicy {
    fn default() -> Self {
        Self {
            threshold: 3,
            window: Duration::minutes(30),
        }
    }
}

/// Failed initialization attempts recorded for one provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttemptState {
    pub attempt_count: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl AttemptState {
    /// Count one more failed attempt made at `now`.
    pub fn record_failure(&mut self, now: DateTime<Utc>) {
        self.attempt_count = self.attempt_count.saturating_add(1);
        self.last_attempt_at = Some(now);
    }

    /// True when no new attempt may start at `now`.
    ///
    /// The circuit is open once the threshold is reached and stays open until
    /// the window since the last failure has elapsed.
    #[must_use]
    pub fn is_circuit_open(&self, now: DateTime<Utc>, policy: &CircuitPolicy) -> bool {
        if self.attempt_count < policy.threshold {
            return false;
        }
        self.last_attempt_at
            .is_some_and(|last| now.signed_duration_since(last) < policy.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_below_threshold() {
        let now = Utc::now();
        let mut state = AttemptState::default();
        state.record_failure(now);
        state.record_failure(now);
        assert!(!state.is_circuit_open(now, &CircuitPolicy::default()));
    }

    #[test]
    fn opens_at_threshold_within_window() {
        let now = Utc::now();
        let mut state = AttemptState::default();
        for _ in 0..3 {
            state.record_failure(now);
        }
        assert!(state.is_circuit_open(now + Duration::minutes(29), &CircuitPolicy::default()));
    }

    #[test]
    fn closes_after_window() {
        let now = Utc::now();
        let mut state = AttemptState::default();
        for _ in 0..3 {
            state.record_failure(now);
        }
        assert!(!state.is_circuit_open(now + Duration::minutes(30), &CircuitPolicy::default()));
        assert_eq!(state.attempt_count, 3);
    }

    #[test]
    fn custom_threshold() {
        let now = Utc::now();
        let policy = CircuitPolicy {
            threshold: 1,
            window: Duration::seconds(10),
        };
        let mut state = AttemptState::default();
        state.record_failure(now);
        assert!(state.is_circuit_open(now, &policy));
    }
}
