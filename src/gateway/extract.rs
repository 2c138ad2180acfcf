//! Recovering a JSON object from a free-form model completion.
//!
//! Models are told to answer with bare JSON but regularly wrap it in a
//! markdown fence or add a sentence before or after it. Extraction picks,
//! in order:
//!
//! 1. the interior of the first triple-backtick fence (optional language tag),
//! 2. the span from the first `{` to the last `}`,
//! 3. the text unchanged.
//!
//! Sanitization then strips raw newlines that some models leave inside
//! string values, which strict JSON parsing rejects.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    // `(?s)` lets `.` cross lines; the tag is a single word right after the fence.
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*\s*(.*?)\s*```").expect("fence pattern is valid")
});

/// Return the JSON-looking part of `text`.
pub fn extract_json(text: &str) -> &str {
    if let Some(inner) = FENCED_BLOCK.captures(text).and_then(|c| c.get(1)) {
        return inner.as_str();
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if end > start {
            return &text[start..=end];
        }
    }

    text
}

/// Remove every `\n` and `\r`.
pub fn sanitize(candidate: &str) -> String {
    candidate.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"category": "Scam", "confidence": "HIGH"}"#;

    #[test]
    fn test_fenced_block_with_language_tag() {
        let text = format!("```json\n{PAYLOAD}\n```");
        assert_eq!(extract_json(&text), PAYLOAD);
    }

    #[test]
    fn test_fenced_block_without_language_tag() {
        let text = format!("Here you go:\n```\n{PAYLOAD}\n```\nLet me know!");
        assert_eq!(extract_json(&text), PAYLOAD);
    }

    #[test]
    fn test_fenced_block_on_one_line() {
        let text = format!("```json {PAYLOAD}```");
        assert_eq!(extract_json(&text), PAYLOAD);
    }

    #[test]
    fn test_fence_wins_over_surrounding_braces() {
        let text = format!("{{ignored}} ```json\n{PAYLOAD}\n``` {{also ignored}}");
        assert_eq!(extract_json(&text), PAYLOAD);
    }

    #[test]
    fn test_brace_span_inside_prose() {
        let text = format!("Sure! The analysis is {PAYLOAD} -- hope that helps.");
        assert_eq!(extract_json(&text), PAYLOAD);
    }

    #[test]
    fn test_nested_braces_take_outermost_span() {
        let text = r#"result: {"a": {"b": 1}} done"#;
        assert_eq!(extract_json(text), r#"{"a": {"b": 1}}"#);
    }

    #[test]
    fn test_no_structure_returns_input_unchanged() {
        let text = "I cannot classify this message.";
        assert_eq!(extract_json(text), text);
    }

    #[test]
    fn test_closing_brace_before_opening_returns_input() {
        let text = "} backwards {";
        assert_eq!(extract_json(text), text);
    }

    #[test]
    fn test_sanitize_removes_newlines_and_carriage_returns() {
        let candidate = "{\r\n  \"explanation\": \"line one\nline two\"\r\n}";
        let sanitized = sanitize(candidate);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert_eq!(sanitized, "{  \"explanation\": \"line oneline two\"}");
    }

    #[test]
    fn test_sanitize_makes_broken_string_parseable() {
        let candidate = "{\"explanation\": \"a\nb\"}";
        assert!(serde_json::from_str::<serde_json::Value>(candidate).is_err());
        assert!(serde_json::from_str::<serde_json::Value>(&sanitize(candidate)).is_ok());
    }
}
