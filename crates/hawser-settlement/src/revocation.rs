//! Revocation delivery.
//!
//! When a delivery is revoked (content deleted, consent withdrawn), the
//! executor notifies the configured webhook. Delivery is best-effort
//! and single-attempt: the outcome is a structured result, never a
//! thrown error, and any retry policy belongs to the caller.

use async_trait::async_trait;
use hawser_canonical::{hash_canonical, redact_string};
use hawser_core::{ClientError, OrderId, RevocationConfig, RevocationMode};
use ring::hmac;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// The revocation event to deliver.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevocationRequest {
    pub delivery_id: String,
    pub order_id: OrderId,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Outcome of one delivery attempt.
///
/// `ok` is true only when the transport call completed AND reported a
/// success status. Missing endpoint, transport failure, and non-2xx
/// responses are all failures with distinguishable error text.
#[derive(Clone, Debug, Serialize)]
pub struct RevocationOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RevocationOutcome {
    fn success(status: Option<u16>) -> Self {
        Self {
            ok: true,
            status,
            error: None,
        }
    }

    fn failure(status: Option<u16>, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            status,
            error: Some(error.into()),
        }
    }
}

/// A prepared webhook POST.
#[derive(Clone, Debug)]
pub struct WebhookDelivery {
    pub endpoint: String,
    pub body: String,
    pub headers: Vec<(&'static str, String)>,
    pub timeout: Duration,
}

/// HTTP transport seam; injectable for tests.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// Perform the POST and return the response status code.
    async fn post(&self, delivery: WebhookDelivery) -> Result<u16, ClientError>;
}

/// reqwest-backed transport.
pub struct HttpWebhookTransport {
    client: reqwest::Client,
}

impl HttpWebhookTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpWebhookTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn post(&self, delivery: WebhookDelivery) -> Result<u16, ClientError> {
        let mut request = self
            .client
            .post(&delivery.endpoint)
            .timeout(delivery.timeout)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        for (name, value) in &delivery.headers {
            request = request.header(*name, value.as_str());
        }

        let response = request
            .body(delivery.body)
            .send()
            .await
            .map_err(|err| ClientError::Transport(redact_string(&err.to_string())))?;
        Ok(response.status().as_u16())
    }
}

/// Delivers revocation notifications per the configured mode.
pub struct RevocationExecutor {
    config: RevocationConfig,
    transport: Arc<dyn WebhookTransport>,
}

impl RevocationExecutor {
    pub fn new(config: RevocationConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpWebhookTransport::new()))
    }

    pub fn with_transport(config: RevocationConfig, transport: Arc<dyn WebhookTransport>) -> Self {
        Self { config, transport }
    }

    /// Execute exactly one delivery attempt.
    pub async fn execute(&self, request: &RevocationRequest) -> RevocationOutcome {
        if self.config.mode != RevocationMode::Webhook {
            return RevocationOutcome::success(None);
        }

        let endpoint = match self
            .config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
        {
            Some(endpoint) => endpoint.to_string(),
            None => {
                return RevocationOutcome::failure(None, "revocation.endpoint is required");
            }
        };

        let payload = match serde_json::to_value(request) {
            Ok(payload) => payload,
            Err(err) => return RevocationOutcome::failure(None, err.to_string()),
        };
        let body = payload.to_string();
        let payload_hash = hash_canonical(&payload);
        let timestamp = chrono::Utc::now().to_rfc3339();

        let mut headers = vec![
            ("x-hawser-timestamp", timestamp.clone()),
            ("x-hawser-payload-hash", payload_hash.to_hex()),
        ];
        if let Some(secret) = &self.config.signing_secret {
            let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
            let tag = hmac::sign(&key, format!("{timestamp}.{body}").as_bytes());
            headers.push(("x-hawser-signature", hex::encode(tag.as_ref())));
        }
        if let Some(api_key) = &self.config.api_key {
            headers.push(("x-hawser-api-key", api_key.clone()));
        }

        let delivery = WebhookDelivery {
            endpoint,
            body,
            headers,
            timeout: Duration::from_millis(self.config.timeout_ms),
        };

        match self.transport.post(delivery).await {
            Ok(status) if (200..300).contains(&status) => {
                tracing::debug!(delivery_id = %request.delivery_id, status, "revocation delivered");
                RevocationOutcome::success(Some(status))
            }
            Ok(status) => {
                tracing::warn!(delivery_id = %request.delivery_id, status, "revocation webhook returned non-success status");
                RevocationOutcome::failure(
                    Some(status),
                    format!("webhook returned status {status}"),
                )
            }
            Err(err) => {
                tracing::warn!(delivery_id = %request.delivery_id, error = %err, "revocation webhook delivery failed");
                RevocationOutcome::failure(None, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubTransport {
        calls: AtomicUsize,
        deliveries: Mutex<Vec<WebhookDelivery>>,
        response: Result<u16, ClientError>,
    }

    impl StubTransport {
        fn returning(response: Result<u16, ClientError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                deliveries: Mutex::new(Vec::new()),
                response,
            })
        }
    }

    #[async_trait]
    impl WebhookTransport for StubTransport {
        async fn post(&self, delivery: WebhookDelivery) -> Result<u16, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.deliveries.lock().push(delivery);
            self.response.clone()
        }
    }

    fn webhook_config(endpoint: Option<&str>) -> RevocationConfig {
        RevocationConfig {
            mode: RevocationMode::Webhook,
            endpoint: endpoint.map(str::to_string),
            ..RevocationConfig::default()
        }
    }

    fn request() -> RevocationRequest {
        RevocationRequest {
            delivery_id: "dlv-1".to_string(),
            order_id: OrderId::new("ord-1"),
            status: "revoked".to_string(),
            reason: Some("content deleted".to_string()),
        }
    }

    #[tokio::test]
    async fn test_non_webhook_mode_is_noop_success() {
        let transport = StubTransport::returning(Ok(200));
        let executor =
            RevocationExecutor::with_transport(RevocationConfig::default(), transport.clone());

        let outcome = executor.execute(&request()).await;

        assert!(outcome.ok);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_endpoint_fails_without_transport_call() {
        let transport = StubTransport::returning(Ok(200));
        let executor =
            RevocationExecutor::with_transport(webhook_config(None), transport.clone());

        let outcome = executor.execute(&request()).await;

        assert!(!outcome.ok);
        assert!(outcome.error.unwrap().contains("revocation.endpoint"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_invokes_transport_exactly_once() {
        let transport = StubTransport::returning(Ok(200));
        let executor = RevocationExecutor::with_transport(
            webhook_config(Some("https://example.test/hook")),
            transport.clone(),
        );

        let outcome = executor.execute(&request()).await;

        assert!(outcome.ok);
        assert_eq!(outcome.status, Some(200));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);

        let deliveries = transport.deliveries.lock();
        let delivery = &deliveries[0];
        assert_eq!(delivery.endpoint, "https://example.test/hook");
        assert!(delivery.body.contains("\"deliveryId\":\"dlv-1\""));
        assert!(delivery
            .headers
            .iter()
            .any(|(name, _)| *name == "x-hawser-payload-hash"));
    }

    #[tokio::test]
    async fn test_non_2xx_is_failure_with_status() {
        let transport = StubTransport::returning(Ok(503));
        let executor = RevocationExecutor::with_transport(
            webhook_config(Some("https://example.test/hook")),
            transport,
        );

        let outcome = executor.execute(&request()).await;

        assert!(!outcome.ok);
        assert_eq!(outcome.status, Some(503));
        assert!(outcome.error.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_transport_error_is_failure() {
        let transport = StubTransport::returning(Err(ClientError::Transport(
            "connection refused".to_string(),
        )));
        let executor = RevocationExecutor::with_transport(
            webhook_config(Some("https://example.test/hook")),
            transport.clone(),
        );

        let outcome = executor.execute(&request()).await;

        assert!(!outcome.ok);
        assert!(outcome.status.is_none());
        assert!(outcome.error.unwrap().contains("connection refused"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signature_header_present_when_secret_configured() {
        let transport = StubTransport::returning(Ok(204));
        let mut config = webhook_config(Some("https://example.test/hook"));
        config.signing_secret = Some("shh".to_string());
        config.api_key = Some("key-1".to_string());
        let executor = RevocationExecutor::with_transport(config, transport.clone());

        let outcome = executor.execute(&request()).await;
        assert!(outcome.ok);

        let deliveries = transport.deliveries.lock();
        let headers = &deliveries[0].headers;
        assert!(headers.iter().any(|(name, _)| *name == "x-hawser-signature"));
        assert!(headers
            .iter()
            .any(|(name, value)| *name == "x-hawser-api-key" && value == "key-1"));
    }
}
