//! Error types for the classification gateway.
//!
//! `Display` carries diagnostic detail for server-side logs. What the caller
//! sees comes from [`GatewayError::public_message`], which never includes
//! model output or upstream response bodies.

use http::StatusCode;

/// Failures while talking to the external classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("classifier error: {0}")]
    Api(String),

    #[error("classifier returned no text: {0}")]
    EmptyCompletion(String),
}

/// Everything `ClassificationGateway::classify` can fail with.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Caller input missing or empty.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The classifier call itself failed.
    #[error("upstream classifier failed: {0}")]
    Upstream(#[from] ClassifierError),

    /// The classifier answered, but not with something we can interpret.
    /// `raw` is the untouched completion, for logs only.
    #[error("unusable classifier output: {reason}")]
    Format { reason: String, raw: String },

    /// Missing credential or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn format(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        GatewayError::Format {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// HTTP status the handler answers with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) | GatewayError::Format { .. } | GatewayError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to untrusted callers.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "Text for analysis is required.",
            GatewayError::Upstream(_) => "AI service is unavailable. Please try again later.",
            GatewayError::Format { .. } => "AI response format error. Please try again later.",
            GatewayError::Config(_) => "Service is not configured correctly.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::Validation("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::format("bad json", "hello").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Upstream(ClassifierError::Api("quota".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Config("no key".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_never_contains_raw_output() {
        let err = GatewayError::format("expected value at line 1", "SECRET RAW COMPLETION");
        assert!(!err.public_message().contains("SECRET"));
        assert!(err.to_string().contains("expected value"));
        assert!(!err.to_string().contains("SECRET"), "raw output stays out of Display too");
    }

    #[test]
    fn test_upstream_message_hides_status_body() {
        let err: GatewayError = ClassifierError::Status {
            status: 403,
            body: "API key not valid".into(),
        }
        .into();
        assert!(err.to_string().contains("403"));
        assert!(!err.public_message().contains("API key"));
    }
}
