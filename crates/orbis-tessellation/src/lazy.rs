//! A once-only initialization slot with explicit state.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

enum SlotState<T: ?Sized> {
    Uninitialized,
    InProgress,
    Ready(Arc<T>),
}

/// Holds a value produced on first request.
///
/// The first caller of [`get_or_init`](Self::get_or_init) runs the
/// initializer; callers arriving while it runs block until it finishes and
/// receive the same `Arc`. If the initializer panics the slot returns to the
/// uninitialized state and one of the waiters retries.
pub struct LazySlot<T: ?Sized> {
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

impl<T: ?Sized> LazySlot<T> {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Uninitialized),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The value, if it has been produced.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        match &*self.lock() {
            SlotState::Ready(value) => Some(Arc::clone(value)),
            _ => None,
        }
    }

    /// Whether the value has been produced.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(&*self.lock(), SlotState::Ready(_))
    }

    /// Return the value, producing it with `init` if no one has yet.
    pub fn get_or_init(&self, init: impl FnOnce() -> Arc<T>) -> Arc<T> {
        let mut state = self.lock();
        loop {
            if let SlotState::Ready(value) = &*state {
                return Arc::clone(value);
            }
            if matches!(*state, SlotState::Uninitialized) {
                break;
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *state = SlotState::InProgress;
        drop(state);

        let guard = ResetOnPanic { slot: self };
        let value = init();
        std::mem::forget(guard);

        *self.lock() = SlotState::Ready(Arc::clone(&value));
        self.ready.notify_all();
        value
    }
}

impl<T: ?Sized> Default for LazySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> std::fmt::Debug for LazySlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.lock() {
            SlotState::Uninitialized => "uninitialized",
            SlotState::InProgress => "in progress",
            SlotState::Ready(_) => "ready",
        };
        f.debug_struct("LazySlot").field("state", &state).finish()
    }
}

struct ResetOnPanic<'a, T: ?Sized> {
    slot: &'a LazySlot<T>,
}

impl<T: ?Sized> Drop for ResetOnPanic<'_, T> {
    fn drop(&mut self) {
        *self.slot.lock() = SlotState::Uninitialized;
        self.slot.ready.notify_all();
    }
}
