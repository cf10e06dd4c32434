//! Process-wide badge counts with subscribe semantics.
//!
//! Unread message and pending friend-request counts live in one store that
//! collaborators update and every surface observes, instead of each surface
//! polling its own copy.

use std::sync::{Arc, Mutex, PoisonError};

/// Badge counts shown across the app chrome
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BadgeCounts {
    pub unread_messages: u32,
    pub pending_requests: u32,
}

impl BadgeCounts {
    /// Combined count for a single app-level badge
    pub fn total(&self) -> u32 {
        self.unread_messages + self.pending_requests
    }
}

type Subscriber = Box<dyn Fn(BadgeCounts) + Send>;

struct Inner {
    counts: BadgeCounts,
    subscribers: Vec<Subscriber>,
}

/// Shared badge store. Clones observe the same underlying counts.
///
/// Subscriber callbacks run under the store lock and must not call back
/// into the store.
#[derive(Clone)]
pub struct BadgeStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for BadgeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BadgeStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                counts: BadgeCounts::default(),
                subscribers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panicked subscriber must not wedge every badge surface
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current snapshot of the counts
    pub fn counts(&self) -> BadgeCounts {
        self.lock().counts
    }

    pub fn set_unread_messages(&self, count: u32) {
        self.update(|c| c.unread_messages = count);
    }

    pub fn set_pending_requests(&self, count: u32) {
        self.update(|c| c.pending_requests = count);
    }

    /// Apply a mutation and notify every subscriber with the new snapshot
    pub fn update(&self, f: impl FnOnce(&mut BadgeCounts)) {
        let mut inner = self.lock();
        f(&mut inner.counts);
        let snapshot = inner.counts;
        tracing::debug!(
            "Badge counts updated: {} unread, {} pending",
            snapshot.unread_messages,
            snapshot.pending_requests
        );
        for subscriber in &inner.subscribers {
            subscriber(snapshot);
        }
    }

    /// Register an observer; it fires immediately with the current counts
    /// and again on every update.
    pub fn subscribe(&self, f: impl Fn(BadgeCounts) + Send + 'static) {
        let mut inner = self.lock();
        f(inner.counts);
        inner.subscribers.push(Box::new(f));
    }
}
