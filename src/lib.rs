//! Inspection Offload Bridge
//!
//! Bridges a single-threaded HTTP phase pipeline and a blocking inline
//! inspection engine: the handler for the early request phase hands the
//! request to a bounded worker pool, the event loop keeps serving other
//! connections, and the pipeline is resumed with the recorded outcome
//! once inspection finishes.
//!
//! ## Components
//!
//! - **Dispatcher**: builds a one-shot task and suspends the request
//! - **Worker**: runs the ordered inspection sequence on a pool thread
//! - **Resumer**: drives the phase state machine with the outcome
//! - **Intervention translator**: engine verdict → pipeline action
//!
//! ## Guarantees
//!
//! - Exactly one task outstanding per request
//! - In-flight counter balanced for every outcome
//! - Request object pinned for the whole suspension

pub mod config;
pub mod context;
pub mod dispatch;
pub mod engine;
pub mod host;
pub mod intervention;
pub mod pool;
pub mod resume;
pub mod stats;
pub mod worker;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::BridgeConfig;
pub use context::{Outcome, RequestContext};
pub use dispatch::{Dispatcher, PhaseStatus, Suspension};
pub use engine::{EngineSession, EngineVerdict, InspectionEngine};
pub use host::{ConnectionInfo, HostRequest, RequestLine};
pub use pool::WorkerPool;
pub use resume::Resumer;
pub use stats::{BridgeStats, BridgeStatsSnapshot};

use thiserror::Error;

/// Bridge errors
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The worker pool could not accept the task (saturated or shut down).
    /// Surfaced as a hard pipeline error at the calling phase, never retried.
    #[error("worker pool rejected task")]
    PoolRejected,

    /// The worker finished without delivering an outcome (pool torn down
    /// mid-flight). Should not happen when shutdown drains properly.
    #[error("suspension channel closed before an outcome was delivered")]
    SuspensionLost,

    /// A request fact could not be extracted from the host representation.
    #[error("failed to extract {0} from request")]
    Extraction(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Status the request is finalized with when setup fails.
pub const INTERNAL_SERVER_ERROR: u16 = 500;
