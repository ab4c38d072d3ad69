use std::env;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Connection settings for the routing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 30_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl ClientConfig {
    /// Reads `ROUTE_API_URL`, `ROUTE_API_TIMEOUT_MS` and
    /// `ROUTE_API_CONNECT_TIMEOUT_MS`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("ROUTE_API_URL").unwrap_or(defaults.base_url),
            request_timeout_ms: env_var_u64("ROUTE_API_TIMEOUT_MS", defaults.request_timeout_ms),
            connect_timeout_ms: env_var_u64(
                "ROUTE_API_CONNECT_TIMEOUT_MS",
                defaults.connect_timeout_ms,
            ),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn find_route_url(&self) -> String {
        format!("{}/api/find-route/", self.base_url.trim_end_matches('/'))
    }
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
