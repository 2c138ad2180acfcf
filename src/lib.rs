/// Text Risk Classifier — Shared Library
///
/// Classifies user-submitted text as Scam, Online Gambling, Hoax or Safe
/// by prompting Gemini and normalizing its answer.
///
/// Each serverless function in `api/` imports from this library
/// to keep handlers thin and logic reusable.

pub mod classifier;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod logging;
pub mod models;

pub use classifier::{Classifier, GeminiClassifier};
pub use config::{GatewayConfig, NormalizationMode};
pub use error::{ClassifierError, GatewayError};
pub use gateway::ClassificationGateway;
pub use models::{ClassificationRequest, ClassificationResult};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
