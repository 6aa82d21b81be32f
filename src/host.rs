//! Host pipeline boundary
//!
//! Everything the bridge needs from the server framework: read-only
//! request facts for the worker, and the phase/lifecycle hooks the
//! dispatcher and resumer drive. The host owns the request object; the
//! in-flight counter is what keeps it alive across the suspension.

use crate::Result;
use std::net::SocketAddr;

/// Resolved socket endpoints of the connection carrying the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub client: SocketAddr,
    pub server: SocketAddr,
}

/// Raw request-line facts, untouched by normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestLine {
    /// Method token, e.g. "GET".
    pub method: String,

    /// Request target as received, e.g. "/index.html?q=1".
    pub target: String,

    /// Protocol token as received, e.g. "HTTP/1.1".
    pub protocol: String,
}

/// Handle to one in-flight request inside the host pipeline.
///
/// Fact accessors are read-only and safe to call from a pool thread while
/// the request is suspended; the lifecycle hooks run only on the event
/// loop (dispatcher before submission, resumer after completion).
pub trait HostRequest: Send + Sync {
    /// Opaque identity of the request, stable for its lifetime.
    fn id(&self) -> u64;

    /// Request-line facts. Extraction failure is fatal for inspection.
    fn request_line(&self) -> Result<RequestLine>;

    /// Resolved connection endpoints. Extraction failure is fatal.
    fn connection_info(&self) -> Result<ConnectionInfo>;

    /// All request headers in original order, duplicates preserved.
    fn headers(&self) -> Vec<(String, String)>;

    /// Whether the host already routed this request to error-page
    /// generation. Interventions are ignored on that path.
    fn is_error_page(&self) -> bool;

    /// Pin the request: the host must not finalize or free it while the
    /// counter is above its prior value.
    fn inc_in_flight(&self);

    /// Release one pin. Paired with exactly one `inc_in_flight`.
    fn dec_in_flight(&self);

    /// Mark/unmark the request as performing asynchronous I/O.
    fn set_async_io(&self, on: bool);

    /// Move the phase cursor to the first handler of the next phase.
    fn advance_phase(&self);

    /// Move the phase cursor past the current handler only.
    fn advance_handler(&self);

    /// Re-enter phase execution at the current cursor.
    fn resume_phases(&self);

    /// Finalize the request with `status`; no further phase execution.
    fn finalize(&self, status: u16);

    /// Discard any unread request body.
    fn discard_body(&self);

    /// Run work queued behind this request on the same connection.
    fn run_posted(&self);
}
