use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::analysis::AnalysisPayload;
use crate::error::ReframeError;
use crate::transport::ThoughtAnalyzer;

/// Placeholder markers in an endpoint URL meaning "not yet configured".
const PLACEHOLDER_MARKERS: [&str; 2] = ["your-webhook-id", "example.com"];

#[derive(Serialize)]
struct ThoughtRequest<'a> {
    thought: &'a str,
}

/// Real transport: one POST to the analysis webhook.
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    endpoint: String,
}

impl WebhookClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// True when the configured endpoint still looks like the shipped
    /// placeholder. Requests are attempted anyway; the caller decides how
    /// loudly to warn.
    pub fn is_placeholder_endpoint(&self) -> bool {
        PLACEHOLDER_MARKERS.iter().any(|m| self.endpoint.contains(m))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ThoughtAnalyzer for WebhookClient {
    async fn analyze(&self, thought: &str) -> Result<AnalysisPayload, ReframeError> {
        if self.is_placeholder_endpoint() {
            warn!(endpoint = %self.endpoint, "webhook endpoint looks like a placeholder, attempting anyway");
        }
        info!(chars = thought.chars().count(), "sending thought to analysis webhook");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ThoughtRequest { thought })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "webhook request failed");
                ReframeError::Transport(format!("Network/Request Error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies may carry a human-readable message; fall back to
            // the HTTP status line when they don't parse.
            let message = match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        format!(
                            "HTTP error {} - {}",
                            status.as_u16(),
                            status.canonical_reason().unwrap_or("Unknown")
                        )
                    }),
                Err(_) => format!(
                    "HTTP error {} - {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            };
            error!(status = status.as_u16(), %message, "webhook returned an error");
            return Err(ReframeError::Transport(message));
        }

        let payload: AnalysisPayload = response.json().await.map_err(|e| {
            error!(error = %e, "webhook response body was not valid JSON");
            ReframeError::Transport(format!("Network/Request Error: {}", e))
        })?;

        let missing = payload.missing_fields();
        if !missing.is_empty() {
            error!(?missing, "webhook response is missing required fields");
            return Err(ReframeError::MalformedResponse { missing });
        }

        debug!("webhook response received and shape-checked");
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_placeholder_endpoint_detection() {
        assert!(WebhookClient::new("https://hook.example.com/abc").is_placeholder_endpoint());
        assert!(WebhookClient::new("https://hook.eu1.make.com/your-webhook-id")
            .is_placeholder_endpoint());
        assert!(!WebhookClient::new("https://hook.eu1.make.com/x9f2").is_placeholder_endpoint());
    }

    #[tokio::test]
    async fn test_successful_analysis_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({ "thought": "I always mess up" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "distortions": ["Overgeneralization"],
                "alternative": "One mistake is not a pattern.",
                "encouragement": "Keep going."
            })))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&format!("{}/analyze", server.uri()));
        let payload = client.analyze("I always mess up").await.unwrap();
        let result = payload.validate().unwrap();
        assert_eq!(result.distortions, vec!["Overgeneralization"]);
        assert_eq!(result.encouragement, "Keep going.");
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(serde_json::json!({ "message": "Scenario queue is full" })),
            )
            .mount(&server)
            .await;

        let client = WebhookClient::new(&server.uri());
        let err = client.analyze("thought").await.unwrap_err();
        assert!(matches!(err, ReframeError::Transport(_)));
        assert_eq!(err.to_string(), "Scenario queue is full");
    }

    #[tokio::test]
    async fn test_non_json_error_body_falls_back_to_status_line() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&server.uri());
        let err = client.analyze("thought").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error 500 - Internal Server Error");
    }

    #[tokio::test]
    async fn test_missing_fields_fail_as_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "distortions": ["Labeling"]
            })))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&server.uri());
        match client.analyze("thought").await {
            Err(ReframeError::MalformedResponse { missing }) => {
                assert_eq!(missing, vec!["alternative", "encouragement"]);
            }
            other => panic!("expected malformed response, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        // Port 9 (discard) is refused on loopback in the test environment.
        let client = WebhookClient::new("http://127.0.0.1:9/analyze");
        let err = client.analyze("thought").await.unwrap_err();
        assert!(matches!(err, ReframeError::Transport(_)));
        assert!(err.to_string().starts_with("Network/Request Error:"));
    }
}
