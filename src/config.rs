//! Build-time Configuration
//!
//! Values are baked in at compile time from environment variables, the
//! same way a static web bundle receives its API endpoint.

use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// How long a success/error banner stays visible
pub const STATUS_TTL: Duration = Duration::from_secs(3);
/// Delay before the forgot-password modal closes after a reset
pub const RESET_CLOSE_DELAY: Duration = Duration::from_secs(2);
/// Delay before returning to the login page after signup
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL prepended to every `/api/...` path, without trailing slash
    pub api_base_url: String,
    pub log_level: String,
    pub status_ttl: Duration,
    pub reset_close_delay: Duration,
    pub redirect_delay: Duration,
}

impl AppConfig {
    /// Read `CLEARTICK_API_URL` and `CLEARTICK_LOG` as captured at build time
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("CLEARTICK_API_URL"), option_env!("CLEARTICK_LOG"))
    }

    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            log_level: log_level.unwrap_or(DEFAULT_LOG_LEVEL).to_string(),
            status_ttl: STATUS_TTL,
            reset_close_delay: RESET_CLOSE_DELAY,
            redirect_delay: REDIRECT_DELAY,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.status_ttl, Duration::from_secs(3));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = AppConfig::from_values(Some("https://api.example.com/"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_blank_base_url_uses_default() {
        let config = AppConfig::from_values(Some("  "), None);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }
}
