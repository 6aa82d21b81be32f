//! Inspection worker
//!
//! Runs on a pool thread while the request is suspended. Feeds the engine
//! in the only order that makes verdicts meaningful (connection, request
//! line, headers) and asks for an intervention after every feed so a cheap
//! early signal short-circuits the expensive later ones.

use crate::context::{Outcome, RequestContext};
use crate::engine::{EngineSession, InspectionEngine};
use crate::host::HostRequest;
use crate::intervention;
use tracing::{debug, error, warn};

/// Run the one-time inspection sequence for a request.
///
/// If the context already carries a session this handler was re-entered
/// for the same request; the setup must not repeat, so the worker declines
/// immediately without touching the engine.
pub fn inspect(
    ctx: &mut RequestContext,
    req: &dyn HostRequest,
    engine: &dyn InspectionEngine,
) -> Outcome {
    debug!(request = req.id(), "inspection job dispatched");

    if ctx.has_session() {
        debug!(request = req.id(), "session already present, declining");
        return Outcome::Decline;
    }

    let mut session = match engine.create_session(req.id()) {
        Some(session) => session,
        None => {
            error!(request = req.id(), "engine refused to open a session");
            return Outcome::InternalError;
        }
    };

    let (outcome, triggered) = feed_sequence(session.as_mut(), req);

    // The session outlives this job whatever the outcome; later phases
    // find it on the context and skip the setup.
    ctx.session = Some(session);
    if triggered {
        ctx.mark_intervention();
    }

    outcome
}

/// The ordered feed/check sequence. Returns the outcome and whether an
/// intervention fired.
fn feed_sequence(session: &mut dyn EngineSession, req: &dyn HostRequest) -> (Outcome, bool) {
    let id = req.id();

    // Connection endpoints. Failing to extract them is fatal; the engine
    // refusing them only degrades inspection quality.
    let info = match req.connection_info() {
        Ok(info) => info,
        Err(err) => {
            error!(request = id, %err, "cannot resolve connection endpoints");
            return (Outcome::InternalError, false);
        }
    };
    if !session.feed_connection_info(&info.client, &info.server) {
        warn!(request = id, "engine did not take connection information");
    }

    debug!(request = id, "checking intervention after connection info");
    if let Some(outcome) = intervention::translate(session, id, true) {
        return (outcome, true);
    }

    let line = match req.request_line() {
        Ok(line) => line,
        Err(err) => {
            error!(request = id, %err, "cannot extract request line");
            return (Outcome::InternalError, false);
        }
    };
    if line.target.is_empty() {
        error!(request = id, "target is of length zero");
        return (Outcome::InternalError, false);
    }
    let version = normalize_http_version(&line.protocol);
    session.feed_request_line(&line.target, &line.method, version);

    debug!(request = id, "checking intervention after request line");
    if let Some(outcome) = intervention::translate(session, id, true) {
        return (outcome, true);
    }

    for (name, value) in req.headers() {
        debug!(request = id, header = %name, value = %value, "adding request header");
        session.add_header(&name, &value);
    }
    session.commit_headers();

    debug!(request = id, "checking intervention after request headers");
    let verdict = intervention::translate(session, id, true);
    if req.is_error_page() {
        // The request already sits on the error-page path; acting on a
        // verdict here would recurse into error handling.
        debug!(request = id, "error page in progress, ignoring intervention");
    } else if let Some(outcome) = verdict {
        return (outcome, true);
    }

    (Outcome::Continue, false)
}

/// Normalize the protocol token into the version form the engine expects.
///
/// Recognized versions pass through; anything else is the raw token with
/// a leading "HTTP/" stripped, falling back to "1.0".
fn normalize_http_version(token: &str) -> &str {
    match token {
        "0.9" | "1.0" | "1.1" | "2.0" => token,
        _ => match token.strip_prefix("HTTP/") {
            Some(rest) if !rest.is_empty() => rest,
            _ => "1.0",
        },
    }
}
