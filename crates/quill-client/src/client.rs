//! HTTP client for the content-generation backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::error::ClientError;
use crate::request::GenerationRequest;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Generation API client.
///
/// Wraps a [`ureq::Agent`] with a global timeout; HTTP status codes are
/// read from the response and mapped to [`ClientError`] by hand rather
/// than surfacing as transport errors.
pub struct GenerationClient {
    agent: Agent,
    base_url: String,
}

impl GenerationClient {
    /// Create a client for the given backend base URL with the default
    /// 30 second timeout.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout.
    #[must_use]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/{endpoint}", self.base_url)
    }

    /// Request content generation for a validated request.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] with a user-facing message: timeout and
    /// transport failures, per-status backend failures (429, 401, 400,
    /// other), or an empty generation result.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, ClientError> {
        let body = GenerateBody {
            topic: &request.topic,
            tone: request.tone.label(),
            keywords: &request.keywords,
            content_length: request.content_length,
        };

        tracing::debug!("requesting generation for topic {:?}", request.topic);
        let mut response = self
            .agent
            .post(&self.api_url("generate"))
            .send_json(&body)
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let error_body = response
                .body_mut()
                .read_json::<ApiErrorBody>()
                .unwrap_or_default();
            return Err(classify_status(status, &error_body));
        }

        let generated: GeneratedContent = response
            .body_mut()
            .read_json()
            .map_err(transport_error)?;
        if generated.content.trim().is_empty() {
            return Err(ClientError::EmptyContent);
        }
        Ok(generated)
    }

    /// Check backend availability.
    #[must_use]
    pub fn health_check(&self) -> bool {
        self.agent
            .get(&self.api_url("health"))
            .call()
            .is_ok_and(|response| response.status().is_success())
    }
}

/// Map a transport error, keeping timeouts distinct.
fn transport_error(error: ureq::Error) -> ClientError {
    match error {
        ureq::Error::Timeout(_) => ClientError::Timeout,
        other => ClientError::Network(other),
    }
}

/// Map a non-success status plus its error body to a client error.
fn classify_status(status: u16, body: &ApiErrorBody) -> ClientError {
    match status {
        429 => ClientError::RateLimited {
            retry_after: body.retry_after.unwrap_or(60),
        },
        401 => ClientError::Unauthorized,
        400 => ClientError::InvalidRequest(
            body.error
                .clone()
                .unwrap_or_else(|| "please check your inputs".to_owned()),
        ),
        _ => ClientError::Server(
            body.error
                .clone()
                .unwrap_or_else(|| format!("request failed with status {status}")),
        ),
    }
}

/// Request body for the generate endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    topic: &'a str,
    tone: &'a str,
    keywords: &'a str,
    content_length: u32,
}

/// Successful generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedContent {
    /// Generated markdown body.
    pub content: String,
    /// Echo of the effective request parameters, when the backend sends it.
    #[serde(default)]
    pub metadata: Option<GenerationMetadata>,
}

/// Request parameters echoed back by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    /// Topic after backend-side sanitization.
    pub topic: String,
    /// Tone label.
    pub tone: String,
    /// Keyword list after backend-side sanitization.
    pub keywords: String,
    /// Length requested, in words.
    pub requested_length: u32,
    /// Word count of the generated content.
    pub actual_length: u32,
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    error: Option<String>,
    retry_after: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(error: Option<&str>, retry_after: Option<u64>) -> ApiErrorBody {
        ApiErrorBody {
            error: error.map(ToOwned::to_owned),
            retry_after,
        }
    }

    #[test]
    fn test_rate_limit_uses_backend_retry_after() {
        let err = classify_status(429, &body(Some("slow down"), Some(17)));
        assert!(matches!(err, ClientError::RateLimited { retry_after: 17 }));
    }

    #[test]
    fn test_rate_limit_default_retry_after() {
        let err = classify_status(429, &body(None, None));
        assert!(matches!(err, ClientError::RateLimited { retry_after: 60 }));
    }

    #[test]
    fn test_unauthorized() {
        assert!(matches!(
            classify_status(401, &body(Some("bad key"), None)),
            ClientError::Unauthorized
        ));
    }

    #[test]
    fn test_bad_request_carries_backend_message() {
        let err = classify_status(400, &body(Some("topic is required"), None));
        assert_eq!(err.to_string(), "invalid request: topic is required");
    }

    #[test]
    fn test_other_status_is_server_error() {
        let err = classify_status(500, &body(None, None));
        assert_eq!(
            err.to_string(),
            "generation failed: request failed with status 500"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GenerationClient::new("http://localhost:3001/");
        assert_eq!(client.api_url("generate"), "http://localhost:3001/api/generate");
    }

    #[test]
    fn test_response_parsing() {
        let generated: GeneratedContent = serde_json::from_str(
            r##"{
                "content": "# Hi",
                "metadata": {
                    "topic": "t",
                    "tone": "Casual",
                    "keywords": "",
                    "requestedLength": 200,
                    "actualLength": 187
                }
            }"##,
        )
        .unwrap();
        assert_eq!(generated.content, "# Hi");
        assert_eq!(generated.metadata.unwrap().actual_length, 187);
    }

    #[test]
    fn test_response_without_metadata() {
        let generated: GeneratedContent =
            serde_json::from_str(r#"{"content": "text"}"#).unwrap();
        assert!(generated.metadata.is_none());
    }
}
