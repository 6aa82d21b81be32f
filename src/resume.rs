//! Resumer
//!
//! Runs back on the event loop once the worker has delivered its outcome.
//! Balances the suspension bookkeeping first, unconditionally, then drives
//! the phase state machine to whatever the outcome demands.

use crate::context::{Outcome, RequestContext};
use crate::host::HostRequest;
use crate::stats::BridgeStats;
use crate::INTERNAL_SERVER_ERROR;
use std::sync::Arc;
use tracing::debug;

/// Event-loop completion side of the bridge.
pub struct Resumer {
    stats: Arc<BridgeStats>,
}

impl Resumer {
    pub fn new(stats: Arc<BridgeStats>) -> Self {
        Self { stats }
    }

    /// Resume the pipeline for a completed task.
    ///
    /// The unpin and async-io clear happen exactly once per task, before
    /// any outcome handling, so the counter stays balanced on every path.
    /// Returns the context for the host to store back on the request.
    pub fn resume(
        &self,
        req: &dyn HostRequest,
        ctx: RequestContext,
        outcome: Outcome,
    ) -> RequestContext {
        debug!(request = req.id(), ?outcome, "inspection job finalized");

        req.dec_in_flight();
        req.set_async_io(false);
        self.stats.record_resume(outcome);

        match outcome {
            Outcome::Continue => {
                req.advance_phase();
                req.resume_phases();
            }
            Outcome::Decline => {
                req.advance_handler();
                req.resume_phases();
            }
            Outcome::Terminate(status) => {
                req.discard_body();
                req.finalize(status);
            }
            Outcome::InternalError => {
                req.discard_body();
                req.finalize(INTERNAL_SERVER_ERROR);
            }
            Outcome::Defer => {
                // Stays suspended by design; a later event resumes it
                // through a different path.
            }
        }

        req.run_posted();
        ctx
    }

    pub fn stats(&self) -> &BridgeStats {
        &self.stats
    }
}
