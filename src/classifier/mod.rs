//! External text classifier.
//!
//! The gateway only needs one thing from the LLM: given a prompt, give back
//! a text completion. Keeping that behind a trait lets tests run the whole
//! pipeline against canned completions.

pub mod gemini;

use async_trait::async_trait;

use crate::error::ClassifierError;

pub use gemini::GeminiClassifier;

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Name for logging.
    fn name(&self) -> &str;

    /// Send `prompt` and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, ClassifierError>;
}
