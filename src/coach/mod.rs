//! Client for the remote AI coach service.
//!
//! The coach is a plain request/response service: the client posts the
//! user's message together with the chat history and, when available, the
//! latest assessment snapshot, and receives a single reply string.
//!
//! # Configuration
//!
//! Coach settings can be configured via:
//! - CLI arguments: `--api-url`, `--timeout`
//! - Environment variables: `FINCOACH_API_URL`, `FINCOACH_TIMEOUT_SECS`
//!
//! CLI arguments take precedence over environment variables.

pub mod conversation;
pub mod greeting;

pub use conversation::{Conversation, FALLBACK_REPLY};
pub use greeting::greeting;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assessment::AssessmentSnapshot;

const DEFAULT_API_URL: &str = "http://localhost:5001/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User id sent when nobody is signed in.
pub const GUEST_USER_ID: &str = "guest";

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Payload posted to the coach's chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
    /// Messages exchanged before `message`.
    pub chat_history: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_results: Option<AssessmentSnapshot>,
}

/// Configuration for coach clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachConfig {
    /// Base URL of the coach API, without trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CoachConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `FINCOACH_API_URL` - base URL of the coach API
    /// - `FINCOACH_TIMEOUT_SECS` - request timeout in seconds
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("FINCOACH_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout_secs = env::var("FINCOACH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            base_url,
            timeout_secs,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Merge with CLI overrides. CLI values take precedence.
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(t) = timeout_secs {
            self.timeout_secs = t;
        }
        self
    }

    /// Full URL for an API path such as `/coach/chat`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Create a coach client from this configuration.
    pub fn create_client(&self) -> Result<Arc<dyn CoachClient>, CoachError> {
        Ok(Arc::new(HttpCoachClient::new(self.clone())?))
    }
}

/// Trait for coach chat clients.
pub trait CoachClient: Send + Sync {
    /// Send one chat request and return the coach's reply. One attempt, no retries.
    fn send(&self, request: &ChatRequest) -> Result<String, CoachError>;

    /// Check that the coach service is reachable, returning its status message.
    fn health(&self) -> Result<String, CoachError>;
}

/// HTTP client for the coach API.
pub struct HttpCoachClient {
    config: CoachConfig,
    http: reqwest::blocking::Client,
}

impl HttpCoachClient {
    pub fn new(config: CoachConfig) -> Result<Self, CoachError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoachError::Build(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    fn read(response: reqwest::blocking::Response) -> Result<(u16, String), CoachError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| CoachError::Connection(format!("Failed to read response: {}", e)))?;
        Ok((status, body))
    }
}

impl CoachClient for HttpCoachClient {
    fn send(&self, request: &ChatRequest) -> Result<String, CoachError> {
        let url = self.config.endpoint("/coach/chat");
        debug!(
            "POST {} ({} history messages, assessment: {})",
            url,
            request.chat_history.len(),
            request.assessment_results.is_some()
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| CoachError::Connection(format!("Cannot reach coach at {}: {}", url, e)))?;

        let (status, body) = Self::read(response)?;
        debug!("Coach responded with status {}", status);
        interpret_chat_response(status, &body)
    }

    fn health(&self) -> Result<String, CoachError> {
        let url = self.config.endpoint("/coach/health");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| CoachError::Connection(format!("Cannot reach coach at {}: {}", url, e)))?;

        let (status, body) = Self::read(response)?;
        interpret_health_response(status, &body)
    }
}

/// Apply the chat response contract to a raw HTTP status and body.
///
/// Only a 2xx `{"status": "success", "reply": "..."}` with a non-blank reply
/// is accepted. Everything else is an error.
pub fn interpret_chat_response(status: u16, body: &str) -> Result<String, CoachError> {
    let json = parse_body(status, body)?;

    match json.get("status").and_then(Value::as_str) {
        Some("success") => match json.get("reply").and_then(Value::as_str) {
            Some(reply) if !reply.trim().is_empty() => Ok(reply.to_string()),
            _ => Err(CoachError::MalformedResponse(
                "success response without a reply".to_string(),
            )),
        },
        Some("error") => Err(CoachError::Service(
            error_message(&json).unwrap_or_else(|| "unknown error".to_string()),
        )),
        _ => Err(CoachError::MalformedResponse(preview(body))),
    }
}

/// Apply the health response contract: 2xx `{"status": "ok", "message": "..."}`.
pub fn interpret_health_response(status: u16, body: &str) -> Result<String, CoachError> {
    let json = parse_body(status, body)?;

    match json.get("status").and_then(Value::as_str) {
        Some("ok") => Ok(json
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("ok")
            .to_string()),
        _ => Err(CoachError::MalformedResponse(preview(body))),
    }
}

/// Check the status and parse the body as JSON.
fn parse_body(status: u16, body: &str) -> Result<Value, CoachError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| error_message(&json))
            .unwrap_or_else(|| format!("request failed with status {}", status));
        return Err(CoachError::Status { status, message });
    }

    serde_json::from_str(body).map_err(|_| CoachError::MalformedResponse(preview(body)))
}

fn error_message(json: &Value) -> Option<String> {
    json.get("message")
        .or_else(|| json.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

/// Errors from coach operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoachError {
    #[error("Cannot connect to the coach service: {0}")]
    Connection(String),

    #[error("Coach service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Coach service error: {0}")]
    Service(String),

    #[error("Malformed coach response: {0}")]
    MalformedResponse(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_success_reply() {
        let reply = interpret_chat_response(200, r#"{"status": "success", "reply": "Save 20%."}"#);
        assert_eq!(reply, Ok("Save 20%.".to_string()));
    }

    #[test]
    fn surfaces_service_error() {
        let result = interpret_chat_response(200, r#"{"status": "error", "message": "quota"}"#);
        assert_eq!(result, Err(CoachError::Service("quota".to_string())));
    }

    #[test]
    fn non_2xx_uses_message_or_error_field() {
        let result = interpret_chat_response(500, r#"{"status": "error", "message": "boom"}"#);
        assert_eq!(
            result,
            Err(CoachError::Status {
                status: 500,
                message: "boom".to_string()
            })
        );

        let result = interpret_chat_response(401, r#"{"error": "token required"}"#);
        assert_eq!(
            result,
            Err(CoachError::Status {
                status: 401,
                message: "token required".to_string()
            })
        );
    }

    #[test]
    fn non_2xx_without_json_reports_status() {
        let result = interpret_chat_response(502, "<html>Bad Gateway</html>");
        assert_eq!(
            result,
            Err(CoachError::Status {
                status: 502,
                message: "request failed with status 502".to_string()
            })
        );
    }

    #[test]
    fn rejects_unexpected_shapes() {
        for body in [
            "not json",
            r#"{"reply": "no status"}"#,
            r#"{"status": "pending"}"#,
            r#"{"status": "success"}"#,
            r#"{"status": "success", "reply": "   "}"#,
            r#"{"status": "success", "reply": 42}"#,
        ] {
            assert!(
                matches!(
                    interpret_chat_response(200, body),
                    Err(CoachError::MalformedResponse(_))
                ),
                "{}",
                body
            );
        }
    }

    #[test]
    fn health_contract() {
        assert_eq!(
            interpret_health_response(200, r#"{"status": "ok", "message": "running"}"#),
            Ok("running".to_string())
        );
        assert!(interpret_health_response(200, r#"{"status": "down"}"#).is_err());
        assert!(matches!(
            interpret_health_response(503, ""),
            Err(CoachError::Status { status: 503, .. })
        ));
    }

    #[test]
    fn request_serialization() {
        let request = ChatRequest {
            message: "How do I start?".to_string(),
            user_id: GUEST_USER_ID.to_string(),
            chat_history: vec![ChatMessage::assistant("Hi!")],
            assessment_results: None,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["message"], "How do I start?");
        assert_eq!(json["user_id"], "guest");
        assert_eq!(json["chat_history"][0]["role"], "assistant");
        assert_eq!(json["chat_history"][0]["content"], "Hi!");
        assert!(json.get("assessment_results").is_none());
    }

    #[test]
    fn endpoint_joins_cleanly() {
        let config = CoachConfig::new().with_base_url("http://coach.local/api/");
        assert_eq!(
            config.endpoint("/coach/chat"),
            "http://coach.local/api/coach/chat"
        );
        assert_eq!(
            config.endpoint("coach/health"),
            "http://coach.local/api/coach/health"
        );
    }

    #[test]
    fn config_overrides() {
        let config = CoachConfig::new().with_timeout_secs(5);

        let updated = config.with_overrides(Some("http://other/api".to_string()), None);
        assert_eq!(updated.base_url, "http://other/api");
        assert_eq!(updated.timeout_secs, 5);

        let updated2 = updated.with_overrides(None, Some(60));
        assert_eq!(updated2.base_url, "http://other/api");
        assert_eq!(updated2.timeout_secs, 60);
    }

    #[test]
    fn test_mock_client() {
        let client = test_support::MockCoachClient::replying("hello");
        let request = ChatRequest {
            message: "hi".to_string(),
            user_id: "u".to_string(),
            chat_history: vec![],
            assessment_results: None,
        };
        assert_eq!(client.send(&request), Ok("hello".to_string()));
        assert!(client.send(&request).is_err());
        assert_eq!(client.requests.lock().unwrap().len(), 2);
    }
}
