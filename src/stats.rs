//! Bridge statistics

use crate::context::Outcome;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters shared between dispatcher and resumer.
#[derive(Debug, Default)]
pub struct BridgeStats {
    dispatched: AtomicU64,
    rejected: AtomicU64,
    continued: AtomicU64,
    declined: AtomicU64,
    terminated: AtomicU64,
    deferred: AtomicU64,
    internal_errors: AtomicU64,
}

/// Point-in-time view of the counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeStatsSnapshot {
    pub dispatched: u64,
    pub rejected: u64,
    pub continued: u64,
    pub declined: u64,
    pub terminated: u64,
    pub deferred: u64,
    pub internal_errors: u64,
}

impl BridgeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_resume(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Continue => &self.continued,
            Outcome::Decline => &self.declined,
            Outcome::Terminate(_) => &self.terminated,
            Outcome::Defer => &self.deferred,
            Outcome::InternalError => &self.internal_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> BridgeStatsSnapshot {
        BridgeStatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            continued: self.continued.load(Ordering::Relaxed),
            declined: self.declined.load(Ordering::Relaxed),
            terminated: self.terminated.load(Ordering::Relaxed),
            deferred: self.deferred.load(Ordering::Relaxed),
            internal_errors: self.internal_errors.load(Ordering::Relaxed),
        }
    }
}
