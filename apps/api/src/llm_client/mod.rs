/// Inference client: the single point of entry for all generative-AI calls.
///
/// ARCHITECTURAL RULE: No other module may call the inference service directly.
/// Classification and document generation go through `InferenceBackend`,
/// which this client implements.
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub mod prompts;
pub mod retry;
#[cfg(test)]
pub(crate) mod scripted;

use retry::{AttemptFailure, RetryPolicy};

const GENERATE_PATH: &str = "/generate";
const HEALTH_PATH: &str = "/health";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Inference service unavailable after {attempts} attempts: {message}")]
    TransientService { attempts: u32, message: String },

    #[error("Inference request rejected (status {status}): {message}")]
    PermanentRequest { status: u16, message: String },

    #[error("Inference service returned an unreadable response: {0}")]
    InvalidResponse(String),
}

/// A single prompt submission. Unset knobs fall back to the client defaults.
#[derive(Debug, Clone, Default)]
pub struct InferenceRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub metadata: Option<Value>,
}

impl InferenceRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn system(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// What callers get back from a successful submission.
#[derive(Debug, Clone)]
pub struct InferenceOutput {
    pub text: String,
    pub model: String,
    pub usage: Usage,
    pub processing_time: Duration,
    pub request_id: Uuid,
}

#[derive(Debug, Serialize)]
struct ServiceRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    system_prompt: Option<&'a str>,
    metadata: &'a Value,
    client_id: &'a str,
    request_id: String,
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    response: String,
    model: Option<String>,
    #[serde(default)]
    usage: Usage,
    #[serde(default)]
    #[allow(dead_code)]
    metadata: Value,
}

/// The seam the classifier and document generator depend on.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn submit(&self, request: InferenceRequest) -> Result<InferenceOutput, LlmError>;
}

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    pub base_url: String,
    pub client_id: String,
    pub model: String,
    pub retry: RetryPolicy,
}

/// HTTP client for the inference service, with per-attempt timeouts and retries.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    settings: InferenceSettings,
}

impl InferenceClient {
    pub fn new(settings: InferenceSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// Checks `/health` once with a short timeout. Never retries.
    pub async fn health(&self) -> bool {
        let check = self.client.get(self.url(HEALTH_PATH)).send();
        match tokio::time::timeout(HEALTH_TIMEOUT, check).await {
            Ok(Ok(response)) => response.status().as_u16() == 200,
            Ok(Err(e)) => {
                warn!("Inference health check failed: {e}");
                false
            }
            Err(_) => {
                warn!("Inference health check timed out after {:?}", HEALTH_TIMEOUT);
                false
            }
        }
    }

    /// One attempt, bounded by the policy's attempt timeout.
    async fn attempt(&self, body: &ServiceRequest<'_>) -> Result<ServiceResponse, AttemptFailure> {
        let call = async {
            let response = self
                .client
                .post(self.url(GENERATE_PATH))
                .header("content-type", "application/json")
                .json(body)
                .send()
                .await
                .map_err(classify_transport)?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AttemptFailure::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let raw = response.text().await.map_err(classify_transport)?;
            serde_json::from_str::<ServiceResponse>(&raw)
                .map_err(|e| AttemptFailure::InvalidBody(e.to_string()))
        };

        match tokio::time::timeout(self.settings.retry.attempt_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AttemptFailure::Timeout),
        }
    }
}

fn classify_transport(e: reqwest::Error) -> AttemptFailure {
    if e.is_timeout() {
        AttemptFailure::Timeout
    } else {
        AttemptFailure::Network(e.to_string())
    }
}

#[async_trait]
impl InferenceBackend for InferenceClient {
    /// Retries network errors, timeouts, 429 and 5xx with linear backoff.
    /// Any other non-success status fails immediately.
    async fn submit(&self, request: InferenceRequest) -> Result<InferenceOutput, LlmError> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let empty_metadata = Value::Object(Default::default());
        let policy = &self.settings.retry;

        let body = ServiceRequest {
            prompt: &request.prompt,
            model: request.model.as_deref().unwrap_or(&self.settings.model),
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system_prompt: request.system_prompt.as_deref(),
            metadata: request.metadata.as_ref().unwrap_or(&empty_metadata),
            client_id: &self.settings.client_id,
            request_id: request_id.to_string(),
        };

        let mut attempt = 1;
        loop {
            match self.attempt(&body).await {
                Ok(response) => {
                    let processing_time = started.elapsed();
                    debug!(
                        request_id = %request_id,
                        attempt,
                        total_tokens = response.usage.total_tokens,
                        "Inference call succeeded in {}ms",
                        processing_time.as_millis()
                    );
                    return Ok(InferenceOutput {
                        text: response.response,
                        model: response.model.unwrap_or_else(|| body.model.to_string()),
                        usage: response.usage,
                        processing_time,
                        request_id,
                    });
                }
                Err(failure) if policy.is_retryable(&failure) => {
                    if !policy.has_attempts_left(attempt) {
                        return Err(LlmError::TransientService {
                            attempts: attempt,
                            message: failure.to_string(),
                        });
                    }
                    let delay = policy.delay_for(attempt);
                    warn!(
                        request_id = %request_id,
                        attempt,
                        max_attempts = policy.max_attempts,
                        "Inference attempt failed ({failure}), retrying after {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(AttemptFailure::Status { status, body }) => {
                    return Err(LlmError::PermanentRequest {
                        status,
                        message: body,
                    });
                }
                Err(failure) => return Err(LlmError::InvalidResponse(failure.to_string())),
            }
        }
    }
}

/// Returns the first balanced `{...}` fragment in `text`, skipping braces that
/// appear inside JSON string literals.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_uri: &str, attempt_timeout: Duration) -> InferenceClient {
        InferenceClient::new(InferenceSettings {
            base_url: server_uri.to_string(),
            client_id: "compliance-api-test".to_string(),
            model: "test-model".to_string(),
            retry: RetryPolicy {
                max_attempts: 3,
                base_delay: Duration::from_millis(5),
                attempt_timeout,
            },
        })
        .unwrap()
    }

    fn ok_body(text: &str) -> serde_json::Value {
        json!({
            "response": text,
            "model": "test-model",
            "usage": {"promptTokens": 12, "completionTokens": 30, "totalTokens": 42},
            "metadata": {}
        })
    }

    #[tokio::test]
    async fn test_submit_returns_text_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(json!({
                "prompt": "Classify this",
                "system_prompt": "You are an auditor",
                "client_id": "compliance-api-test",
                "model": "test-model",
                "max_tokens": 2000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("hello")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let output = client
            .submit(InferenceRequest::new("Classify this").system("You are an auditor"))
            .await
            .unwrap();

        assert_eq!(output.text, "hello");
        assert_eq!(output.usage.total_tokens, 42);
        assert_eq!(output.model, "test-model");
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_until_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("recovered")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let output = client.submit(InferenceRequest::new("p")).await.unwrap();
        assert_eq!(output.text, "recovered");
    }

    #[tokio::test]
    async fn test_rate_limit_exhaustion_is_transient() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(429))
            .expect(3)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.submit(InferenceRequest::new("p")).await.unwrap_err();
        assert!(
            matches!(err, LlmError::TransientService { attempts: 3, .. }),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad prompt"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.submit(InferenceRequest::new("p")).await.unwrap_err();
        match err {
            LlmError::PermanentRequest { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad prompt");
            }
            other => panic!("expected PermanentRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_attempts_time_out_and_are_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(ok_body("late"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_millis(50));
        let err = client.submit(InferenceRequest::new("p")).await.unwrap_err();
        assert!(matches!(err, LlmError::TransientService { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_unreadable_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.submit(InferenceRequest::new("p")).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transient() {
        let client = client_for("http://127.0.0.1:1", Duration::from_secs(1));
        let err = client.submit(InferenceRequest::new("p")).await.unwrap_err();
        assert!(matches!(err, LlmError::TransientService { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_health_reports_availability() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(client_for(&server.uri(), Duration::from_secs(1)).health().await);
        assert!(!client_for("http://127.0.0.1:1", Duration::from_secs(1)).health().await);
    }

    #[test]
    fn test_extract_json_object_skips_prose() {
        let reply = "Here is the analysis:\n{\"documentType\": \"Privacy Policy\"}\nThanks!";
        assert_eq!(
            extract_json_object(reply),
            Some("{\"documentType\": \"Privacy Policy\"}")
        );
    }

    #[test]
    fn test_extract_json_object_handles_nesting_and_string_braces() {
        let reply = r#"{"a": {"b": "x } y"}, "c": 1} trailing {"d": 2}"#;
        assert_eq!(
            extract_json_object(reply),
            Some(r#"{"a": {"b": "x } y"}, "c": 1}"#)
        );
    }

    #[test]
    fn test_extract_json_object_unbalanced_is_none() {
        assert_eq!(extract_json_object("{\"a\": 1"), None);
        assert_eq!(extract_json_object("no braces at all"), None);
    }
}
