//! Gateway configuration.
//!
//! Built once at the composition root (`api/analyze.rs`, the `classify`
//! CLI) and handed to the gateway and handler explicitly. Nothing below
//! reads the environment on its own.

use crate::error::GatewayError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Origins allowed to call the API from a browser when `ALLOWED_ORIGINS`
/// is not set: the production site and the usual local dev servers.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "https://wiradp.github.io",
    "http://localhost:5500",
    "http://127.0.0.1:5500",
    "http://localhost:8888",
];

/// How forgiving normalization is with model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationMode {
    /// Unrecognised enum values fall back to `Unknown` / `N/A`.
    #[default]
    Lenient,
    /// A missing category or any out-of-domain enum value is a format error.
    Strict,
}

impl std::str::FromStr for NormalizationMode {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(NormalizationMode::Lenient),
            "strict" => Ok(NormalizationMode::Strict),
            other => Err(GatewayError::Config(format!(
                "unknown normalization mode '{other}', expected 'lenient' or 'strict'"
            ))),
        }
    }
}

impl std::fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizationMode::Lenient => write!(f, "lenient"),
            NormalizationMode::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Clone)]
pub struct GatewayConfig {
    /// Gemini API key.
    pub api_key: String,
    /// Model identifier, e.g. "gemini-2.5-flash".
    pub model: String,
    /// REST base URL, without trailing slash.
    pub api_base: String,
    /// Exact-match CORS allow-list.
    pub allowed_origins: Vec<String>,
    pub normalization: NormalizationMode,
}

impl GatewayConfig {
    /// Config with defaults for everything except the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        GatewayConfig {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            normalization: NormalizationMode::default(),
        }
    }

    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// | Variable             | Default                          |
    /// |----------------------|----------------------------------|
    /// | `GEMINI_API_KEY`     | required                         |
    /// | `GEMINI_MODEL`       | [`DEFAULT_MODEL`]                |
    /// | `GEMINI_API_BASE`    | [`DEFAULT_API_BASE`]             |
    /// | `ALLOWED_ORIGINS`    | [`DEFAULT_ALLOWED_ORIGINS`]      |
    /// | `NORMALIZATION_MODE` | `lenient`                        |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("GEMINI_API_KEY")
            .ok_or_else(|| GatewayError::Config("GEMINI_API_KEY is not set".to_string()))?;

        let mut config = GatewayConfig::new(api_key.trim()).with_model(model_from_lookup(&lookup));

        if let Some(base) = non_blank("GEMINI_API_BASE") {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(origins) = non_blank("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins);
        }
        if let Some(mode) = non_blank("NORMALIZATION_MODE") {
            config.normalization = mode.parse()?;
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_normalization(mut self, mode: NormalizationMode) -> Self {
        self.normalization = mode;
        self
    }
}

/// Model identifier from `GEMINI_MODEL`, or [`DEFAULT_MODEL`] when unset or
/// blank. Used where only the model is needed, e.g. the health endpoint,
/// which must answer even without an API key.
pub fn model_from_env() -> String {
    model_from_lookup(|key| std::env::var(key).ok())
}

pub fn model_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("GEMINI_MODEL")
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

// Hand-written so the key never ends up in logs via `{:?}`.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("allowed_origins", &self.allowed_origins)
            .field("normalization", &self.normalization)
            .finish()
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
