//! Shared mocks for bridge tests: a scripted engine that replays a fixed
//! verdict sequence and records every call, and a host request whose
//! lifecycle hooks count into atomics.

use crate::engine::{EngineSession, EngineVerdict, InspectionEngine};
use crate::host::{ConnectionInfo, HostRequest, RequestLine};
use crate::{BridgeError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Engine that answers intervention queries from a scripted sequence.
/// Once the script runs out it keeps answering `Pass`.
pub struct ScriptedEngine {
    verdicts: Arc<Mutex<VecDeque<EngineVerdict>>>,
    calls: Arc<Mutex<Vec<String>>>,
    refuse_session: bool,
    refuse_connection_info: bool,
}

impl ScriptedEngine {
    pub fn passing() -> Self {
        Self::with_verdicts(Vec::new())
    }

    pub fn with_verdicts(verdicts: Vec<EngineVerdict>) -> Self {
        Self {
            verdicts: Arc::new(Mutex::new(verdicts.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
            refuse_session: false,
            refuse_connection_info: false,
        }
    }

    pub fn refusing_sessions() -> Self {
        let mut engine = Self::passing();
        engine.refuse_session = true;
        engine
    }

    pub fn refusing_connection_info(mut self) -> Self {
        self.refuse_connection_info = true;
        self
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl InspectionEngine for ScriptedEngine {
    fn create_session(&self, _request_id: u64) -> Option<Box<dyn EngineSession>> {
        self.calls.lock().push("create_session".into());
        if self.refuse_session {
            return None;
        }
        Some(Box::new(ScriptedSession {
            verdicts: self.verdicts.clone(),
            calls: self.calls.clone(),
            refuse_connection_info: self.refuse_connection_info,
        }))
    }
}

struct ScriptedSession {
    verdicts: Arc<Mutex<VecDeque<EngineVerdict>>>,
    calls: Arc<Mutex<Vec<String>>>,
    refuse_connection_info: bool,
}

impl EngineSession for ScriptedSession {
    fn feed_connection_info(
        &mut self,
        client: &std::net::SocketAddr,
        server: &std::net::SocketAddr,
    ) -> bool {
        self.calls
            .lock()
            .push(format!("connection_info:{client}->{server}"));
        !self.refuse_connection_info
    }

    fn feed_request_line(&mut self, target: &str, method: &str, http_version: &str) {
        self.calls
            .lock()
            .push(format!("request_line:{method} {target} {http_version}"));
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.calls.lock().push(format!("header:{name}={value}"));
    }

    fn commit_headers(&mut self) {
        self.calls.lock().push("commit".into());
    }

    fn query_intervention(&mut self, _request_id: u64, _blocking: bool) -> EngineVerdict {
        self.calls.lock().push("query".into());
        self.verdicts.lock().pop_front().unwrap_or(EngineVerdict::Pass)
    }
}

/// Host request whose pipeline hooks record into counters.
pub struct MockRequest {
    pub method: String,
    pub target: String,
    pub protocol: String,
    pub headers: Vec<(String, String)>,
    pub error_page: bool,
    pub fail_connection_info: bool,
    pub fail_request_line: bool,

    in_flight: AtomicI64,
    async_io: AtomicBool,
    finalized: Mutex<Option<u16>>,
    body_discarded: AtomicBool,
    phase_advances: AtomicUsize,
    handler_advances: AtomicUsize,
    phase_resumes: AtomicUsize,
    posted_runs: AtomicUsize,
}

impl MockRequest {
    pub fn get(target: &str) -> Self {
        Self {
            method: "GET".into(),
            target: target.into(),
            protocol: "HTTP/1.1".into(),
            headers: Vec::new(),
            error_page: false,
            fail_connection_info: false,
            fail_request_line: false,
            in_flight: AtomicI64::new(0),
            async_io: AtomicBool::new(false),
            finalized: Mutex::new(None),
            body_discarded: AtomicBool::new(false),
            phase_advances: AtomicUsize::new(0),
            handler_advances: AtomicUsize::new(0),
            phase_resumes: AtomicUsize::new(0),
            posted_runs: AtomicUsize::new(0),
        }
    }

    pub fn with_headers(mut self, headers: &[(&str, &str)]) -> Self {
        self.headers = headers
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn on_error_page(mut self) -> Self {
        self.error_page = true;
        self
    }

    pub fn in_flight(&self) -> i64 {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn async_io(&self) -> bool {
        self.async_io.load(Ordering::SeqCst)
    }

    pub fn finalized(&self) -> Option<u16> {
        *self.finalized.lock()
    }

    pub fn body_discarded(&self) -> bool {
        self.body_discarded.load(Ordering::SeqCst)
    }

    pub fn phase_advances(&self) -> usize {
        self.phase_advances.load(Ordering::SeqCst)
    }

    pub fn handler_advances(&self) -> usize {
        self.handler_advances.load(Ordering::SeqCst)
    }

    pub fn phase_resumes(&self) -> usize {
        self.phase_resumes.load(Ordering::SeqCst)
    }

    pub fn posted_runs(&self) -> usize {
        self.posted_runs.load(Ordering::SeqCst)
    }
}

impl HostRequest for MockRequest {
    fn id(&self) -> u64 {
        1
    }

    fn request_line(&self) -> Result<RequestLine> {
        if self.fail_request_line {
            return Err(BridgeError::Extraction("request line"));
        }
        Ok(RequestLine {
            method: self.method.clone(),
            target: self.target.clone(),
            protocol: self.protocol.clone(),
        })
    }

    fn connection_info(&self) -> Result<ConnectionInfo> {
        if self.fail_connection_info {
            return Err(BridgeError::Extraction("connection info"));
        }
        Ok(ConnectionInfo {
            client: "203.0.113.7:49152".parse().unwrap(),
            server: "192.0.2.10:443".parse().unwrap(),
        })
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }

    fn is_error_page(&self) -> bool {
        self.error_page
    }

    fn inc_in_flight(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
    }

    fn dec_in_flight(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn set_async_io(&self, on: bool) {
        self.async_io.store(on, Ordering::SeqCst);
    }

    fn advance_phase(&self) {
        self.phase_advances.fetch_add(1, Ordering::SeqCst);
    }

    fn advance_handler(&self) {
        self.handler_advances.fetch_add(1, Ordering::SeqCst);
    }

    fn resume_phases(&self) {
        self.phase_resumes.fetch_add(1, Ordering::SeqCst);
    }

    fn finalize(&self, status: u16) {
        *self.finalized.lock() = Some(status);
    }

    fn discard_body(&self) {
        self.body_discarded.store(true, Ordering::SeqCst);
    }

    fn run_posted(&self) {
        self.posted_runs.fetch_add(1, Ordering::SeqCst);
    }
}
