//! Stub submission gateways for driving the wizard without a network.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;
use uuid::Uuid;

use reservation_core::gateway::{
    interpret_response, GatewayAck, GatewayError, GatewayResult, SubmissionGateway,
};
use reservation_core::models::ReservationPayload;

#[derive(Debug, Clone)]
pub enum StubResponse {
    Http { status: u16, body: String },
    Unreachable,
}

impl StubResponse {
    fn resolve(&self) -> GatewayResult<GatewayAck> {
        match self {
            Self::Http { status, body } => interpret_response(*status, body),
            Self::Unreachable => Err(GatewayError::Network("connection refused".to_string())),
        }
    }
}

/// Answers every call with a scripted response and records what it was sent
#[derive(Debug)]
pub struct RecordingGateway {
    response: StubResponse,
    calls: AtomicUsize,
    requests: Mutex<Vec<(ReservationPayload, Uuid)>>,
}

impl RecordingGateway {
    pub fn responding(status: u16, body: Value) -> Self {
        Self::with_response(StubResponse::Http {
            status,
            body: body.to_string(),
        })
    }

    pub fn unreachable() -> Self {
        Self::with_response(StubResponse::Unreachable)
    }

    pub fn with_response(response: StubResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(ReservationPayload, Uuid)> {
        self.requests.lock().clone()
    }

    pub fn last_payload(&self) -> Option<ReservationPayload> {
        self.requests.lock().last().map(|(payload, _)| payload.clone())
    }
}

#[async_trait]
impl SubmissionGateway for RecordingGateway {
    async fn submit(
        &self,
        payload: &ReservationPayload,
        idempotency_key: Uuid,
    ) -> GatewayResult<GatewayAck> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push((payload.clone(), idempotency_key));
        self.response.resolve()
    }

    fn name(&self) -> &str {
        "recording-stub"
    }
}

/// Holds every call open until the test releases it
#[derive(Debug)]
pub struct BlockingGateway {
    inner: RecordingGateway,
    called: Notify,
    release: Notify,
}

impl BlockingGateway {
    pub fn new(response: StubResponse) -> Self {
        Self {
            inner: RecordingGateway::with_response(response),
            called: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn accepting() -> Self {
        Self::new(StubResponse::Http {
            status: 200,
            body: r#"{"ok": true}"#.to_string(),
        })
    }

    /// Wait until a submission has reached the gateway
    pub async fn wait_for_call(&self) {
        self.called.notified().await;
    }

    /// Let the pending submission complete
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn call_count(&self) -> usize {
        self.inner.call_count()
    }
}

#[async_trait]
impl SubmissionGateway for BlockingGateway {
    async fn submit(
        &self,
        payload: &ReservationPayload,
        idempotency_key: Uuid,
    ) -> GatewayResult<GatewayAck> {
        self.called.notify_one();
        self.release.notified().await;
        self.inner.submit(payload, idempotency_key).await
    }

    fn name(&self) -> &str {
        "blocking-stub"
    }
}
