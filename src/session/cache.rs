//! Single-key reactive store for the last-known session user.
//!
//! DESIGN
//! ======
//! The cache is process-wide and outlives any one component, so it is built
//! on reference-counted `ArcRwSignal`s rather than arena-owned signals tied
//! to a reactive owner. Consumers read; only the session core writes.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use leptos::prelude::*;

use crate::net::error::ApiError;
use crate::session::state::UserSlot;

/// Reactive store holding the current [`UserSlot`] plus the surfaced fetch
/// error and the refetch-deduplication flag.
#[derive(Clone, Debug)]
pub struct SessionCache {
    user: ArcRwSignal<UserSlot>,
    fetch_error: ArcRwSignal<Option<ApiError>>,
    refetching: ArcRwSignal<bool>,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            user: ArcRwSignal::new(UserSlot::Unknown),
            fetch_error: ArcRwSignal::new(None),
            refetching: ArcRwSignal::new(false),
        }
    }

    /// Current slot; reactive when read inside a tracking context.
    /// Returns `Unknown` before the initial resolution.
    pub fn read(&self) -> UserSlot {
        self.user.get()
    }

    /// Current slot without subscribing the caller.
    pub fn read_untracked(&self) -> UserSlot {
        self.user.get_untracked()
    }

    /// Replace the cached slot and notify consumers. A resolved write
    /// supersedes any previously surfaced fetch error.
    pub fn write(&self, slot: UserSlot) {
        if slot.is_resolved() {
            self.fetch_error.set(None);
        }
        self.user.set(slot);
    }

    /// Fetch error surfaced for consumer display, if any.
    pub fn fetch_error(&self) -> Option<ApiError> {
        self.fetch_error.get()
    }

    pub fn set_fetch_error(&self, err: Option<ApiError>) {
        self.fetch_error.set(err);
    }

    /// Whether a canonical-user refetch is currently outstanding.
    pub fn is_refetching(&self) -> bool {
        self.refetching.get()
    }

    /// Test-and-set the refetch flag. Returns `false` when a refetch is
    /// already outstanding, which is the at-most-one-in-flight policy for
    /// overlapping invalidations. Single-threaded event loop, so this is
    /// race-free.
    pub fn begin_refetch(&self) -> bool {
        if self.refetching.get_untracked() {
            return false;
        }
        self.refetching.set(true);
        true
    }

    pub fn finish_refetch(&self) {
        self.refetching.set(false);
    }
}
