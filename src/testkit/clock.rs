//! Wall clock driven by tokio's (pausable) monotonic clock.

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::port::Clock;

/// Reports `anchor + elapsed tokio time`.
///
/// Under `#[tokio::test(start_paused = true)]` the wall clock moves only when
/// tokio time is advanced or auto-advanced by sleeps, so ban windows and
/// circuit windows follow the test's virtual time.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    anchor: DateTime<Utc>,
    started: Instant,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            anchor: Utc::now(),
            started: Instant::now(),
        }
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = Instant::now().saturating_duration_since(self.started);
        self.anchor + chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero())
    }
}
