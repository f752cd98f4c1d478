//! Client configuration

use std::path::PathBuf;

/// Fallback base address when `FIN_SERVER_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the dispatcher and stream manager
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the backend; every relative path is appended to this
    pub base_url: String,

    /// Default debug-trace setting for dispatches
    pub debug: bool,

    /// Optional path for the persisted session file
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let base_url =
            std::env::var("FIN_SERVER_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let debug = std::env::var("FIN_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Self {
            base_url,
            debug,
            session_file: std::env::var_os("FIN_SESSION_FILE").map(PathBuf::from),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given base address
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            debug: true,
            session_file: None,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_enables_debug_by_default() {
        let config = ClientConfig::new("http://10.0.0.1:9000");
        assert_eq!(config.base_url, "http://10.0.0.1:9000");
        assert!(config.debug);
        assert!(config.session_file.is_none());
    }
}
