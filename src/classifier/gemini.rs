//! Gemini `generateContent` client.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::config::GatewayConfig;
use crate::error::ClassifierError;

/// Connection pool shared by every invocation a warm instance serves.
static SHARED_CLIENT: Lazy<Client> = Lazy::new(Client::new);

pub struct GeminiClassifier {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClassifier {
    /// Classifier on the process-wide HTTP client.
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_client(SHARED_CLIENT.clone(), config)
    }

    pub fn with_client(client: Client, config: &GatewayConfig) -> Self {
        GeminiClassifier {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: generate_content_url(&config.api_base, &config.model),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn generate_content_url(api_base: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", api_base.trim_end_matches('/'), model)
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

impl<'a> GeminiRequest<'a> {
    fn user_prompt(prompt: &'a str) -> Self {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiTextPart { text: prompt }],
            }],
        }
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, ClassifierError> {
        if let Some(error) = self.error {
            return Err(ClassifierError::Api(error.message));
        }

        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let candidate = self.candidates.and_then(|c| c.into_iter().next());

        let Some(candidate) = candidate else {
            let reason = block_reason.unwrap_or_else(|| "no candidates".to_string());
            return Err(ClassifierError::EmptyCompletion(reason));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate
                .finish_reason
                .unwrap_or_else(|| "empty candidate".to_string());
            return Err(ClassifierError::EmptyCompletion(reason));
        }

        Ok(text)
    }
}

// ============================================================================
// Classifier Implementation
// ============================================================================

#[async_trait]
impl Classifier for GeminiClassifier {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, ClassifierError> {
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling Gemini");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&GeminiRequest::user_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: GeminiResponse = response.json().await?;
        api_response.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/v1beta/models/gemini-test:generateContent";

    fn classifier_for(server: &MockServer) -> GeminiClassifier {
        let mut config = GatewayConfig::new("test-key").with_model("gemini-test");
        config.api_base = format!("{}/v1beta", server.uri());
        GeminiClassifier::with_client(Client::new(), &config)
    }

    fn parse(value: serde_json::Value) -> GeminiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_endpoint_is_built_from_base_and_model() {
        let config = GatewayConfig::new("k").with_model("gemini-1.5-flash");
        let classifier = GeminiClassifier::new(&config);
        assert_eq!(
            classifier.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(!classifier.endpoint().contains("key="), "key goes in a header, not the URL");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GeminiRequest::user_prompt("hello")).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_parts_are_concatenated() {
        let response = parse(json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"category\":"}, {"text": " \"Scam\"}"}]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(response.into_text().unwrap(), "{\"category\": \"Scam\"}");
    }

    #[test]
    fn test_only_first_candidate_is_used() {
        let response = parse(json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        }));
        assert_eq!(response.into_text().unwrap(), "first");
    }

    #[test]
    fn test_blocked_prompt_is_empty_completion() {
        let response = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        match response.into_text() {
            Err(ClassifierError::EmptyCompletion(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected EmptyCompletion, got {other:?}"),
        }
    }

    #[test]
    fn test_candidate_without_text_is_empty_completion() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": []}, "finishReason": "MAX_TOKENS"}]
        }));
        match response.into_text() {
            Err(ClassifierError::EmptyCompletion(reason)) => assert_eq!(reason, "MAX_TOKENS"),
            other => panic!("expected EmptyCompletion, got {other:?}"),
        }
    }

    #[test]
    fn test_error_object_is_api_error() {
        let response = parse(json!({"error": {"code": 429, "message": "Quota exceeded"}}));
        assert!(matches!(
            response.into_text(),
            Err(ClassifierError::Api(message)) if message == "Quota exceeded"
        ));
    }

    #[tokio::test]
    async fn test_complete_posts_prompt_with_key_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "{\"category\": \"Scam\"}"}]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = classifier_for(&server).complete("classify this").await.unwrap();
        assert_eq!(text, "{\"category\": \"Scam\"}");

        let request = &server.received_requests().await.unwrap()[0];
        assert_eq!(request.url.query(), None, "API key must not travel in the URL");
        assert!(!request.url.as_str().contains("key="));
        assert_eq!(
            request.headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()),
            Some("test-key")
        );

        let body = request.body_json::<serde_json::Value>().unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "classify this");
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .expect(1)
            .mount(&server)
            .await;

        match classifier_for(&server).complete("hello").await {
            Err(ClassifierError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_object_in_success_body_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"error": {"code": 400, "message": "Bad prompt"}})),
            )
            .mount(&server)
            .await;

        let result = classifier_for(&server).complete("hello").await;
        assert!(
            matches!(result, Err(ClassifierError::Api(ref message)) if message == "Bad prompt"),
            "got {result:?}"
        );
    }
}
