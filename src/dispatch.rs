//! Dispatcher
//!
//! Event-loop side of the suspension protocol. The phase handler calls
//! `handle_phase`, which either declines (inspection disabled), suspends
//! the request behind a pool task, or surfaces a hard error when the pool
//! cannot take more work.

use crate::config::BridgeConfig;
use crate::context::{Outcome, RequestContext};
use crate::engine::InspectionEngine;
use crate::host::HostRequest;
use crate::pool::{Task, WorkerPool};
use crate::stats::BridgeStats;
use crate::worker;
use crate::{BridgeError, Result};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// Pending completion of one suspended request.
///
/// Holding this is holding the only path to the worker's outcome; exactly
/// one task can be outstanding per request because the host stores at most
/// one of these. The event loop awaits it and then runs the resumer.
pub struct Suspension {
    rx: oneshot::Receiver<(RequestContext, Outcome)>,
}

impl Suspension {
    /// Wait for the worker to finish and deliver its outcome.
    pub async fn wait(self) -> Result<(RequestContext, Outcome)> {
        self.rx.await.map_err(|_| BridgeError::SuspensionLost)
    }
}

/// What the phase handler reports to the host framework.
pub enum PhaseStatus {
    /// Task submitted; no decision yet. The host must not touch the
    /// request until the suspension completes and the resumer runs.
    Suspended(Suspension),

    /// Inspection is not enabled for this scope; next handler.
    Declined,

    /// The request cannot be inspected; the host finalizes with 500.
    Error(BridgeError),
}

/// Event-loop entry point of the bridge.
pub struct Dispatcher {
    engine: Arc<dyn InspectionEngine>,
    pool: Arc<WorkerPool>,
    config: BridgeConfig,
    stats: Arc<BridgeStats>,
}

impl Dispatcher {
    pub fn new(
        engine: Arc<dyn InspectionEngine>,
        pool: Arc<WorkerPool>,
        config: BridgeConfig,
        stats: Arc<BridgeStats>,
    ) -> Self {
        Self {
            engine,
            pool,
            config,
            stats,
        }
    }

    /// Phase-handler entry, invoked once per request at the inspection
    /// stage. Takes the per-request context out of `ctx_slot` on
    /// acceptance; the resumer hands it back when the task completes.
    pub fn handle_phase(
        &self,
        req: &Arc<dyn HostRequest>,
        ctx_slot: &mut Option<RequestContext>,
    ) -> PhaseStatus {
        debug!(request = req.id(), "entering inspection phase handler");

        if !self.config.enabled {
            debug!(request = req.id(), "inspection not enabled, declining");
            return PhaseStatus::Declined;
        }

        match self.submit(req, ctx_slot) {
            Ok(suspension) => PhaseStatus::Suspended(suspension),
            Err(err) => {
                self.stats.record_rejection();
                PhaseStatus::Error(err)
            }
        }
    }

    /// Build the one-shot task and hand it to the pool. Only on
    /// acceptance is the request pinned and marked as doing async I/O;
    /// a rejected submission leaves no trace on the request.
    fn submit(
        &self,
        req: &Arc<dyn HostRequest>,
        ctx_slot: &mut Option<RequestContext>,
    ) -> Result<Suspension> {
        let mut ctx = ctx_slot.take().unwrap_or_default();
        let engine = self.engine.clone();
        let request = Arc::clone(req);
        let (tx, rx) = oneshot::channel();

        let task = Task::new(move || {
            let outcome = worker::inspect(&mut ctx, request.as_ref(), engine.as_ref());
            // A dropped receiver means the host abandoned the suspension;
            // there is nothing left to resume.
            let _ = tx.send((ctx, outcome));
        });

        self.pool.submit(task)?;

        req.inc_in_flight();
        req.set_async_io(true);
        self.stats.record_dispatch();
        debug!(request = req.id(), "inspection task posted, suspending");

        Ok(Suspension { rx })
    }

    pub fn stats(&self) -> &BridgeStats {
        &self.stats
    }
}
