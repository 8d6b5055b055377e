//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default upstream the fetch layer talks to.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache freshness window in seconds; also the reap interval
    pub cache_ttl_secs: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL that relative fetch targets are appended to
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds
    pub fetch_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Cache TTL and reap interval in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_BASE_URL` - Upstream API base (default: https://pokeapi.co/api/v2/)
    /// - `FETCH_TIMEOUT_SECS` - Upstream request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_secs: parse_var("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl_secs),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            fetch_timeout_secs: parse_var("FETCH_TIMEOUT_SECS")
                .unwrap_or(defaults.fetch_timeout_secs),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Upstream request timeout as a Duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 300,
            server_port: 3000,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            fetch_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_config_durations() {
        let config = Config::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("SERVER_PORT");
        env::remove_var("UPSTREAM_BASE_URL");
        env::remove_var("FETCH_TIMEOUT_SECS");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.fetch_timeout_secs, 10);
    }
}
