use serde::{Deserialize, Deserializer, Serialize};

/// Risk category assigned to a piece of text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    /// Fraud attempt: phishing, fake prizes, impersonation.
    Scam,
    /// Promotion of gambling sites ("judi online").
    #[serde(rename = "Online Gambling")]
    OnlineGambling,
    /// False or misleading information.
    Hoax,
    /// Nothing suspicious found.
    Safe,
    /// Fallback when the model gave no usable category.
    Unknown,
}

impl Category {
    /// Parse a category label produced by the model.
    ///
    /// Matching ignores case and treats `_` / `-` as spaces. Indonesian
    /// labels are accepted because the model tends to answer in the input
    /// language. Returns `None` for `Unknown` and anything unrecognised.
    pub fn from_label(label: &str) -> Option<Self> {
        match fold_label(label).as_str() {
            "scam" | "penipuan" => Some(Category::Scam),
            "online gambling" | "gambling" | "judi online" | "judi" | "perjudian online" => {
                Some(Category::OnlineGambling)
            }
            "hoax" | "hoaks" | "berita palsu" => Some(Category::Hoax),
            "safe" | "aman" => Some(Category::Safe),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Scam => write!(f, "Scam"),
            Category::OnlineGambling => write!(f, "Online Gambling"),
            Category::Hoax => write!(f, "Hoax"),
            Category::Safe => write!(f, "Safe"),
            Category::Unknown => write!(f, "Unknown"),
        }
    }
}

/// How sure the model claims to be.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Confidence {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Confidence {
    pub fn from_label(label: &str) -> Option<Self> {
        match fold_label(label).as_str() {
            "low" | "rendah" => Some(Confidence::Low),
            "medium" | "sedang" => Some(Confidence::Medium),
            "high" | "tinggi" => Some(Confidence::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "LOW"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::High => write!(f, "HIGH"),
            Confidence::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// Overall tone of the text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Sentiment {
    pub fn from_label(label: &str) -> Option<Self> {
        match fold_label(label).as_str() {
            "positive" | "positif" => Some(Sentiment::Positive),
            "negative" | "negatif" => Some(Sentiment::Negative),
            "neutral" | "netral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// API request body for the /api/analyze endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Text to classify. Missing or `null` is treated the same as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ClassificationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        ClassificationRequest { text: text.into() }
    }
}

/// Normalized classification returned to the caller.
///
/// Every field is always populated; see `gateway::normalize` for the
/// fallbacks used when the model leaves something out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: Category,
    pub confidence: Confidence,
    pub sentiment: Sentiment,
    /// Short explanation, in the language of the input text.
    pub explanation: String,
    /// Warning signs found in the text. Empty when `category` is `Safe`.
    pub risk_indicators: Vec<String>,
    /// English name of the detected input language.
    pub language: String,
}

/// Lowercase, turn `_`/`-` into spaces and collapse runs of whitespace.
fn fold_label(label: &str) -> String {
    label
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
