//! CORS policy for browser callers.
//!
//! Only origins on the explicit allow-list are echoed back in
//! `Access-Control-Allow-Origin`; everyone else gets no allow-origin header
//! at all, never a wildcard.

pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CorsPolicy {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Headers to attach to a response for a request from `origin`.
    pub fn headers(&self, origin: Option<&str>) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(4);
        if let Some(origin) = origin.filter(|o| self.is_allowed(o)) {
            headers.push(("Access-Control-Allow-Origin", origin.to_string()));
        }
        headers.push(("Vary", "Origin".to_string()));
        headers.push(("Access-Control-Allow-Methods", ALLOW_METHODS.to_string()));
        headers.push(("Access-Control-Allow-Headers", ALLOW_HEADERS.to_string()));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(headers: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_allowed_origin_is_echoed() {
        let policy = CorsPolicy::new(["https://wiradp.github.io"]);
        let headers = policy.headers(Some("https://wiradp.github.io"));
        assert_eq!(
            header(&headers, "Access-Control-Allow-Origin"),
            Some("https://wiradp.github.io")
        );
        assert_eq!(header(&headers, "Vary"), Some("Origin"));
    }

    #[test]
    fn test_unknown_origin_gets_no_allow_origin() {
        let policy = CorsPolicy::new(["https://wiradp.github.io"]);
        let headers = policy.headers(Some("https://evil.example"));
        assert_eq!(header(&headers, "Access-Control-Allow-Origin"), None);
        assert_eq!(header(&headers, "Access-Control-Allow-Methods"), Some(ALLOW_METHODS));
    }

    #[test]
    fn test_missing_origin_still_gets_method_headers() {
        let policy = CorsPolicy::new(["http://localhost:5500"]);
        let headers = policy.headers(None);
        assert_eq!(header(&headers, "Access-Control-Allow-Origin"), None);
        assert_eq!(header(&headers, "Access-Control-Allow-Headers"), Some(ALLOW_HEADERS));
    }

    #[test]
    fn test_matching_is_exact() {
        let policy = CorsPolicy::new(["http://localhost:5500"]);
        assert!(policy.is_allowed("http://localhost:5500"));
        assert!(!policy.is_allowed("http://localhost:5500/"));
        assert!(!policy.is_allowed("http://localhost:55000"));
        assert!(!policy.is_allowed("*"));
    }
}
