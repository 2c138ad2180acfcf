//! Domain models for the classification gateway.
//!
//! Shared by the gateway, the HTTP handlers and the local CLI.

pub mod classification;

pub use classification::{
    Category, ClassificationRequest, ClassificationResult, Confidence, Sentiment,
};
