//! # HTTP Submission Gateway
//!
//! Posts reservation payloads as JSON to a form-relay endpoint over reqwest.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use super::errors::{GatewayError, GatewayResult};
use super::response::{interpret_response, GatewayAck};
use super::SubmissionGateway;
use crate::config::GatewayConfig;
use crate::constants::system::IDEMPOTENCY_KEY_HEADER;
use crate::logging::{log_error, log_gateway_operation};
use crate::models::ReservationPayload;

/// Gateway backed by an HTTP form relay
///
/// # Examples
///
/// ```rust
/// use reservation_core::config::GatewayConfig;
/// use reservation_core::gateway::{HttpSubmissionGateway, SubmissionGateway};
///
/// let gateway = HttpSubmissionGateway::new(&GatewayConfig::default()).unwrap();
/// assert_eq!(gateway.name(), "http");
/// assert!(gateway.endpoint().as_str().starts_with("https://"));
/// ```
#[derive(Clone)]
pub struct HttpSubmissionGateway {
    client: Client,
    endpoint: Url,
    config: GatewayConfig,
}

impl std::fmt::Debug for HttpSubmissionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSubmissionGateway")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout_ms", &self.config.timeout_ms)
            .finish()
    }
}

impl HttpSubmissionGateway {
    /// Build the reqwest client with the configured timeout and user agent
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let endpoint = config
            .endpoint_url()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .default_headers(default_headers)
            .build()?;

        debug!(endpoint = %endpoint, timeout_ms = config.timeout_ms, "Created HTTP submission gateway");

        Ok(Self {
            client,
            endpoint,
            config: config.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            return GatewayError::Timeout {
                timeout_ms: self.config.timeout_ms,
            };
        }
        log_error(
            "http_gateway",
            "submit",
            &err.to_string(),
            Some(self.endpoint.as_str()),
        );
        GatewayError::Network(err.to_string())
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn submit(
        &self,
        payload: &ReservationPayload,
        idempotency_key: Uuid,
    ) -> GatewayResult<GatewayAck> {
        let started = Instant::now();

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string())
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result = interpret_response(status, &body);
        match &result {
            Ok(_) => log_gateway_operation(
                "submit",
                self.name(),
                Some(idempotency_key),
                "accepted",
                Some(elapsed_ms),
                None,
            ),
            Err(err) => {
                warn!(status, error = %err, "Form relay did not accept reservation request");
                log_gateway_operation(
                    "submit",
                    self.name(),
                    Some(idempotency_key),
                    "rejected",
                    Some(elapsed_ms),
                    err.user_reason(),
                );
            }
        }
        result
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let config = GatewayConfig {
            endpoint: "mailto:hello@example.com".to_string(),
            ..GatewayConfig::default()
        };
        let err = HttpSubmissionGateway::new(&config).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }

    #[test]
    fn test_debug_hides_client_internals() {
        let gateway = HttpSubmissionGateway::new(&GatewayConfig::default()).unwrap();
        let debug = format!("{gateway:?}");
        assert!(debug.contains("formsubmit.co"));
        assert!(debug.contains("20000"));
    }
}
