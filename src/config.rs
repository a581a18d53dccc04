use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Process-wide API settings. Read once when the client is composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Serve requests from the in-process fixture backend instead of HTTP.
    pub use_mock: bool,
    /// Artificial per-request delay for the fixture backend.
    pub mock_latency: Duration,
    pub cache: CacheConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            use_mock: true,
            mock_latency: Duration::ZERO,
            cache: CacheConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source (the environment in production).
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: var("API_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            use_mock: var("USE_MOCK_API")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            mock_latency: var("MOCK_LATENCY_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::ZERO),
            cache: CacheConfig::from_vars(&var),
        }
    }
}

/// Query cache tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// When set, a successful entry older than this is refetched on the next
    /// observation. When unset, entries stay fresh until invalidated.
    pub stale_time: Option<Duration>,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            stale_time: parse_duration_secs(var("QUERY_STALE_TIME_SECS")),
        }
    }
}

fn parse_duration_secs(value: Option<String>) -> Option<Duration> {
    value
        .and_then(|v| v.trim().parse().ok())
        .map(Duration::from_secs)
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_use_the_mock_backend() {
        let config = ApiConfig::from_vars(vars(&[]));
        assert_eq!(config, ApiConfig::default());
        assert!(config.use_mock);
        assert_eq!(config.cache.stale_time, None);
    }

    #[test]
    fn reads_every_setting() {
        let config = ApiConfig::from_vars(vars(&[
            ("API_BASE_URL", "https://api.buildbridge.test/v1"),
            ("USE_MOCK_API", "false"),
            ("MOCK_LATENCY_MS", "250"),
            ("QUERY_STALE_TIME_SECS", "30"),
        ]));
        assert_eq!(config.base_url, "https://api.buildbridge.test/v1");
        assert!(!config.use_mock);
        assert_eq!(config.mock_latency, Duration::from_millis(250));
        assert_eq!(config.cache.stale_time, Some(Duration::from_secs(30)));
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = ApiConfig::from_vars(vars(&[
            ("MOCK_LATENCY_MS", "soon"),
            ("QUERY_STALE_TIME_SECS", "-1"),
            ("USE_MOCK_API", "yes"),
        ]));
        assert_eq!(config.mock_latency, Duration::ZERO);
        assert_eq!(config.cache.stale_time, None);
        assert!(config.use_mock);
    }
}
