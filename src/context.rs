//! Per-request bridge state
//!
//! `RequestContext` is the state carried across the suspension boundary.
//! It is owned, never shared: the dispatcher takes it out of the host's
//! per-request slot, the worker mutates it on a pool thread, the resumer
//! hands it back. No lock is needed because each side holds it alone.

use crate::engine::EngineSession;

/// Outcome of one worker invocation, read once by the resumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No intervention; advance the pipeline to the next phase.
    Continue,

    /// Nothing to add from this handler; advance past it only.
    Decline,

    /// Intervention fired; finalize the request with this status.
    Terminate(u16),

    /// Inspection is not finished; leave the request suspended.
    Defer,

    /// Setup failed (session creation, fact extraction). Resolved by the
    /// resumer as `Terminate(500)`.
    InternalError,
}

impl Outcome {
    /// The status the request is finalized with, if this outcome
    /// finalizes at all.
    pub fn final_status(&self) -> Option<u16> {
        match self {
            Outcome::Terminate(status) => Some(*status),
            Outcome::InternalError => Some(crate::INTERNAL_SERVER_ERROR),
            _ => None,
        }
    }
}

/// Per-request state owned by the host for the request's lifetime.
pub struct RequestContext {
    /// Engine transaction, created lazily and at most once. Once present
    /// it stays valid for the rest of the request; a worker that finds it
    /// already set skips the whole sequence.
    pub(crate) session: Option<Box<dyn EngineSession>>,

    /// Set the first time a verdict requires deviating from normal
    /// continuation. Monotonic.
    intervention_triggered: bool,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            session: None,
            intervention_triggered: false,
        }
    }

    /// Whether the one-time inspection setup already ran.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn intervention_triggered(&self) -> bool {
        self.intervention_triggered
    }

    /// Latch the intervention flag. There is no way to clear it.
    pub(crate) fn mark_intervention(&mut self) {
        self.intervention_triggered = true;
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
