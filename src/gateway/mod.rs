//! # Submission Gateway
//!
//! The single outbound call of the booking flow: handing a completed
//! reservation request to an external relay. The wizard only sees the
//! [`SubmissionGateway`] trait, so tests and embedders can swap the HTTP
//! implementation for their own.

pub mod errors;
pub mod http;
pub mod response;

pub use errors::{GatewayError, GatewayResult};
pub use http::HttpSubmissionGateway;
pub use response::{interpret_response, is_success_status, GatewayAck};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::ReservationPayload;

/// Delivers a reservation request to whoever handles bookings
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Send one request. `idempotency_key` is stable for the wizard session
    /// that produced the payload.
    async fn submit(
        &self,
        payload: &ReservationPayload,
        idempotency_key: Uuid,
    ) -> GatewayResult<GatewayAck>;

    /// Short name used in logs
    fn name(&self) -> &str;
}
