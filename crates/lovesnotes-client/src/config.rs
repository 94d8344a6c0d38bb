//! Client configuration.

/// Default service base URL, including the `/api` prefix.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Where and how the client reaches the service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Read `LOVESNOTES_API_URL` and `LOVESNOTES_TIMEOUT`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("LOVESNOTES_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout_seconds: std::env::var("LOVESNOTES_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builder: set the request timeout.
    pub fn timeout_seconds(mut self, secs: u64) -> Self {
        self.timeout_seconds = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://notes.local/api").timeout_seconds(5);
        assert_eq!(config.base_url, "http://notes.local/api");
        assert_eq!(config.timeout_seconds, 5);
    }
}
