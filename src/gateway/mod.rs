/// Classification gateway — text in, normalized classification out.
///
/// Builds the prompt, makes the single classifier call, then extracts,
/// sanitizes, parses and normalizes the completion. Stateless: every call
/// stands alone and nothing is retried.

pub mod extract;
pub mod normalize;
pub mod prompt;

use crate::classifier::Classifier;
use crate::config::NormalizationMode;
use crate::error::GatewayError;
use crate::models::{ClassificationRequest, ClassificationResult};

pub struct ClassificationGateway<C: Classifier> {
    classifier: C,
    normalization: NormalizationMode,
}

impl<C: Classifier> ClassificationGateway<C> {
    pub fn new(classifier: C, normalization: NormalizationMode) -> Self {
        ClassificationGateway {
            classifier,
            normalization,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classify one request.
    ///
    /// Fails with `Validation` on blank text (without calling the
    /// classifier), `Upstream` when the classifier call fails, and `Format`
    /// when the completion cannot be turned into a result.
    pub async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, GatewayError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(GatewayError::Validation("text is required".to_string()));
        }

        let prompt = prompt::build_prompt(text);
        tracing::info!(
            classifier = self.classifier.name(),
            text_len = text.chars().count(),
            "classifying text"
        );

        let raw = self.classifier.complete(&prompt).await?;
        tracing::debug!(raw = %raw, "raw classifier completion");

        let parsed = parse_completion(&raw)?;
        let result = normalize::normalize(&parsed, self.normalization, &raw)?;

        tracing::info!(
            category = %result.category,
            confidence = %result.confidence,
            indicators = result.risk_indicators.len(),
            "classification complete"
        );
        Ok(result)
    }
}

/// Extract, sanitize and strictly parse a completion.
pub fn parse_completion(raw: &str) -> Result<serde_json::Value, GatewayError> {
    let candidate = extract::extract_json(raw);
    let sanitized = extract::sanitize(candidate);
    serde_json::from_str(&sanitized).map_err(|e| GatewayError::format(e.to_string(), raw))
}
