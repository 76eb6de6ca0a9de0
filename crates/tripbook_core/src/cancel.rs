//! Cancellation for work that completes after its owning view is gone.
//!
//! A view hands a [`CancelToken`] clone to each asynchronous peripheral call
//! (itinerary fetch, geocoding) and cancels it on teardown. Results are only
//! applied through [`CancelToken::apply`], which checks the flag first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the owning view as torn down. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Runs `apply` with `value` unless cancelled. Returns whether it ran.
    pub fn apply<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_cancelled() {
            log::debug!("event=late_result module=cancel status=dropped");
            return false;
        }
        apply(value);
        true
    }
}
