/// Classification prompt sent to the model.
///
/// The model is asked for a bare JSON object with fixed English keys and
/// fixed value domains. Free-text fields stay in the language of the input.

/// Build the prompt for one piece of user text.
///
/// The text is placed inside a fenced block so that instructions embedded
/// in it read as content rather than as part of the prompt.
pub fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following message. Your primary goal is to determine if it is a "Scam", "Online Gambling", "Hoax", or "Safe".
You MUST return a single, valid JSON object and nothing else. Do not use markdown formatting like ```json.
The JSON object must have these exact English keys: "category", "confidence", "sentiment", "explanation", "risk_indicators", "language".

- "category": Must be one of "Scam", "Online Gambling", "Hoax", or "Safe".
- "confidence": Must be one of "LOW", "MEDIUM", "HIGH".
- "sentiment": Must be one of "Positive", "Negative", "Neutral".
- "explanation": A 1-2 sentence explanation in the same language as the input text.
- "risk_indicators": An array of strings listing warning signs, in the same language as the input text. If the category is "Safe", this MUST be an empty array [].
- "language": The detected language name in English.

Text to analyze:
```
{text}
```"#,
        text = text.trim()
    )
}
