//! Intervention translation
//!
//! Pure mapping from an engine verdict to a pipeline action. Used between
//! every feed step in the worker and nowhere else; keeping it in one place
//! means every call site agrees on what the tri-state means.

use crate::context::Outcome;
use crate::engine::{EngineSession, EngineVerdict};

/// Query the engine's verdict once and translate it.
///
/// `None` means no intervention: the caller keeps going. `Some` carries
/// the outcome the sequence must stop with.
pub fn translate(
    session: &mut dyn EngineSession,
    request_id: u64,
    blocking: bool,
) -> Option<Outcome> {
    match session.query_intervention(request_id, blocking) {
        EngineVerdict::Pass => None,
        EngineVerdict::Block(status) => Some(Outcome::Terminate(status)),
        EngineVerdict::Defer => Some(Outcome::Defer),
    }
}
