//! Reconciling parsed model output into a [`ClassificationResult`].
//!
//! The model sometimes answers with localized keys (`kategori`,
//! `penjelasan`, ...) or leaves fields out. Each field is read from the
//! first alias that holds a usable value; `null`, `""` and `false` count as
//! absent. Fields with no usable alias get a fixed fallback.

use serde_json::{Map, Value};

use crate::config::NormalizationMode;
use crate::error::GatewayError;
use crate::models::{Category, ClassificationResult, Confidence, Sentiment};

pub const CATEGORY_KEYS: &[&str] = &["category", "kategori", "Category"];
pub const CONFIDENCE_KEYS: &[&str] = &["confidence", "keyakinan", "tingkat_keyakinan"];
pub const SENTIMENT_KEYS: &[&str] = &["sentiment", "sentimen"];
pub const EXPLANATION_KEYS: &[&str] = &["explanation", "penjelasan"];
pub const RISK_INDICATOR_KEYS: &[&str] = &[
    "risk_indicators",
    "indikator_bahaya",
    "indikator_risiko",
    "riskIndicators",
];
pub const LANGUAGE_KEYS: &[&str] = &["language", "bahasa"];

pub const FALLBACK_EXPLANATION: &str = "No explanation provided.";
pub const FALLBACK_LANGUAGE: &str = "Unknown";

/// Turn a parsed completion into the fixed result schema.
///
/// `raw` is the untouched completion, carried into `GatewayError::Format`
/// for logging.
pub fn normalize(
    parsed: &Value,
    mode: NormalizationMode,
    raw: &str,
) -> Result<ClassificationResult, GatewayError> {
    let Some(object) = parsed.as_object() else {
        return Err(GatewayError::format(
            format!("expected a JSON object, got {}", json_kind(parsed)),
            raw,
        ));
    };

    let category = match enum_field(object, CATEGORY_KEYS, "category", Category::from_label, mode, raw)? {
        Some(category) => category,
        None if mode == NormalizationMode::Strict => {
            return Err(GatewayError::format("category is missing", raw));
        }
        None => Category::Unknown,
    };

    let confidence = enum_field(
        object,
        CONFIDENCE_KEYS,
        "confidence",
        Confidence::from_label,
        mode,
        raw,
    )?
    .unwrap_or(Confidence::NotAvailable);

    let sentiment = enum_field(
        object,
        SENTIMENT_KEYS,
        "sentiment",
        Sentiment::from_label,
        mode,
        raw,
    )?
    .unwrap_or(Sentiment::NotAvailable);

    let explanation = first_present_str(object, EXPLANATION_KEYS)
        .unwrap_or(FALLBACK_EXPLANATION)
        .to_string();

    let language = first_present_str(object, LANGUAGE_KEYS)
        .unwrap_or(FALLBACK_LANGUAGE)
        .to_string();

    let mut risk_indicators = first_present(object, RISK_INDICATOR_KEYS)
        .map(indicator_list)
        .unwrap_or_default();

    if category == Category::Safe && !risk_indicators.is_empty() {
        tracing::debug!(
            dropped = risk_indicators.len(),
            "clearing risk indicators on a Safe result"
        );
        risk_indicators.clear();
    }

    Ok(ClassificationResult {
        category,
        confidence,
        sentiment,
        explanation,
        risk_indicators,
        language,
    })
}

/// First alias whose value is usable.
fn first_present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_present(value))
}

/// Like [`first_present`], restricted to string values.
fn first_present_str<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter(|value| is_present(value))
        .find_map(|value| value.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Resolve an enumerated field across its aliases.
///
/// Lenient mode takes the first alias whose value is in the domain, so an
/// unrecognised value under the primary key does not hide a usable alias.
/// Strict mode judges only the first present alias and rejects it when it
/// is out of domain. `Ok(None)` means no usable value.
fn enum_field<T: Copy>(
    object: &Map<String, Value>,
    keys: &[&str],
    field: &str,
    parse: fn(&str) -> Option<T>,
    mode: NormalizationMode,
    raw: &str,
) -> Result<Option<T>, GatewayError> {
    let mut present = keys
        .iter()
        .filter_map(|key| object.get(*key))
        .filter(|value| is_present(value));

    match mode {
        NormalizationMode::Strict => match present.next() {
            None => Ok(None),
            Some(value) => match value.as_str().and_then(parse) {
                Some(parsed) => Ok(Some(parsed)),
                None => Err(GatewayError::format(
                    format!("{field} has unrecognised value {value}"),
                    raw,
                )),
            },
        },
        NormalizationMode::Lenient => {
            let values: Vec<&Value> = present.collect();
            if let Some(parsed) = values.iter().find_map(|value| value.as_str().and_then(parse)) {
                return Ok(Some(parsed));
            }
            if let Some(value) = values.first() {
                tracing::warn!(field, value = %value, "unrecognised value from classifier, using fallback");
            }
            Ok(None)
        }
    }
}

/// Risk indicators as a list of strings.
///
/// Arrays keep their order; non-string items are rendered as JSON text and
/// blank strings are skipped. A single string becomes a one-item list.
fn indicator_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) => vec![s.trim().to_string()],
        other => vec![other.to_string()],
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
