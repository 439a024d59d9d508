//! Fixture transport for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Headers, RawResponse, Request, Transport, TransportFailure, TransportResult};

/// Replays one canned outcome and records every request it receives.
pub(crate) struct FixtureTransport {
    outcome: TransportResult,
    calls: AtomicUsize,
    requests: Mutex<Vec<Request>>,
}

impl FixtureTransport {
    /// Answer every request with `status` and `body`, classified like a real transport.
    pub(crate) fn ok(status: u16, body: &str) -> Self {
        Self::with_outcome(RawResponse::new(status, Headers::new(), body).into_result())
    }

    /// Fail every request without a response.
    pub(crate) fn unreachable(message: &str) -> Self {
        Self::with_outcome(Err(TransportFailure::network(message)))
    }

    fn with_outcome(outcome: TransportResult) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<Request> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Transport for FixtureTransport {
    async fn send(&self, request: Request) -> TransportResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request);
        self.outcome.clone()
    }
}
