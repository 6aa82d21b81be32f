//! Inspection engine boundary
//!
//! The engine itself (rule compilation, matching, scoring) lives outside
//! this crate; the bridge only needs a session it can feed request facts
//! into and a verdict it can query between feeds.

use std::net::SocketAddr;

/// Engine verdict for a single intervention query.
///
/// The engine's native signal is an opaque tri-state; modeling it as an
/// enum keeps call sites from interpreting sentinel integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineVerdict {
    /// No intervention; keep feeding and let the request proceed.
    Pass,

    /// Block the request and finalize it with this HTTP status.
    Block(u16),

    /// Inspection is not finished; the pipeline must stay suspended and
    /// be re-entered through another path.
    Defer,
}

/// Factory for per-request inspection sessions.
pub trait InspectionEngine: Send + Sync {
    /// Open a session for one request. `None` means the engine could not
    /// set up transaction state; the caller treats that as a setup failure.
    fn create_session(&self, request_id: u64) -> Option<Box<dyn EngineSession>>;
}

/// Per-request engine transaction.
///
/// Feed calls must arrive in order: connection info, request line, headers,
/// headers commit. The verdict may be queried between any two of them.
pub trait EngineSession: Send {
    /// Hand resolved socket endpoints to the engine. Returns false when the
    /// engine could not take the endpoints; inspection continues degraded.
    fn feed_connection_info(&mut self, client: &SocketAddr, server: &SocketAddr) -> bool;

    /// Hand the request line to the engine. `http_version` is already
    /// normalized ("1.1", not "HTTP/1.1").
    fn feed_request_line(&mut self, target: &str, method: &str, http_version: &str);

    /// Hand one header pair to the engine. Called once per header, in
    /// original order, duplicates preserved.
    fn add_header(&mut self, name: &str, value: &str);

    /// Signal that every header has been fed.
    fn commit_headers(&mut self);

    /// Query the engine's current verdict. Called with `blocking = true`
    /// from the worker sequence.
    fn query_intervention(&mut self, request_id: u64, blocking: bool) -> EngineVerdict;
}
