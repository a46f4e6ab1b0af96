//! Single-flight execution of the active-provider initialization.
//!
//! The first caller spawns the initialization as a task and publishes a
//! shared future of its outcome; callers arriving while it runs await the
//! same future. The task runs to completion even if every caller stops
//! awaiting, and clears the slot when it finishes or panics so the next call
//! starts a fresh flight.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::error;

use crate::port::ConnectorHandle;

/// Outcome shared by every caller of one flight.
pub type SharedOutcome = Shared<BoxFuture<'static, Option<ConnectorHandle>>>;

#[derive(Default)]
pub struct SingleFlight {
    slot: Mutex<Option<(u64, SharedOutcome)>>,
    next_id: AtomicU64,
}

impl SingleFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the in-flight initialization, or start one with `start`.
    ///
    /// `start` is only invoked when no flight is running.
    pub fn join_or_start<F, Fut>(self: &Arc<Self>, start: F) -> SharedOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<ConnectorHandle>> + Send + 'static,
    {
        let mut slot = self.slot.lock();
        if let Some((_, outcome)) = slot.as_ref() {
            return outcome.clone();
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let flight = Arc::clone(self);
        let work = start();
        let task = tokio::spawn(async move {
            // Dropped on completion and on panic unwind alike.
            let _slot = SlotRelease { flight, id };
            work.await
        });

        let outcome = async move {
            task.await.unwrap_or_else(|e| {
                error!(component = "single_flight", error = %e, "Initialization task failed");
                None
            })
        }
        .boxed()
        .shared();

        *slot = Some((id, outcome.clone()));
        outcome
    }

    /// True while an initialization is running.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.slot.lock().is_some()
    }

    fn finish(&self, id: u64) {
        let mut slot = self.slot.lock();
        if matches!(slot.as_ref(), Some((current, _)) if *current == id) {
            *slot = None;
        }
    }
}

/// Clears the flight slot when the spawned task ends, however it ends.
struct SlotRelease {
    flight: Arc<SingleFlight>,
    id: u64,
}

impl Drop for SlotRelease {
    fn drop(&mut self) {
        self.flight.finish(self.id);
    }
}
