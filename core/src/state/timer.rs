//! Cancellable one-shot countdown used for auto-hiding terminal states.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Default)]
struct Slot {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// At most one countdown is pending at a time. Each start bumps a generation
/// counter; a firing countdown only takes effect through
/// [`finish`](AutoHideTimer::finish) if its generation is still current, so a
/// countdown that was cancelled or replaced while already waking up is inert.
#[derive(Default)]
pub struct AutoHideTimer {
    slot: Mutex<Slot>,
}

impl AutoHideTimer {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Replaces any pending countdown. `on_expire` receives the generation it
    /// was started with. Returns false when no tokio runtime is available.
    pub fn start<F>(&self, delay: Duration, on_expire: F) -> bool
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let mut slot = self.slot();
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(previous) = slot.pending.take() {
            previous.abort();
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("no tokio runtime; auto-hide disabled for this transition");
                return false;
            }
        };

        // The deadline is fixed at start, not at the task's first poll.
        let deadline = tokio::time::Instant::now() + delay;
        let generation = slot.generation;
        slot.pending = Some(handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            on_expire(generation);
        }));
        true
    }

    pub fn cancel(&self) {
        let mut slot = self.slot();
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(pending) = slot.pending.take() {
            pending.abort();
        }
    }

    /// Claims the expiry for `generation`. True only for the current, still
    /// pending countdown; the slot is cleared in that case.
    pub fn finish(&self, generation: u64) -> bool {
        let mut slot = self.slot();
        if slot.generation != generation || slot.pending.is_none() {
            return false;
        }
        slot.pending = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.slot().pending.is_some()
    }
}

impl Drop for AutoHideTimer {
    fn drop(&mut self) {
        if let Some(pending) = self.slot().pending.take() {
            pending.abort();
        }
    }
}
