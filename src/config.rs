//! Application configuration loaded from environment variables.
//!
//! Each adapter receives its username, base URL, and timeout explicitly
//! from this struct, so tests can point clients at local fixture servers
//! without any process-wide state.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,

    // --- Platform accounts ---
    /// GitHub login whose contribution calendar is aggregated
    pub github_username: String,
    /// GitHub API bearer token (empty token degrades GitHub to no data)
    pub github_token: String,
    /// LeetCode username
    pub leetcode_username: String,
    /// GeeksforGeeks username
    pub gfg_username: String,

    // --- Upstream endpoints (overridable for tests) ---
    pub github_graphql_url: String,
    pub leetcode_base_url: String,
    pub gfg_base_url: String,

    // --- Tuning ---
    /// Per-call timeout for outbound requests, in seconds
    pub fetch_timeout_secs: u64,
    /// Response cache lifetime in minutes; 0 disables caching
    pub cache_ttl_minutes: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),

            github_username: env::var("GITHUB_USERNAME")
                .map_err(|_| ConfigError::Missing("GITHUB_USERNAME"))?,
            // Missing token is tolerated: the GitHub adapter reports no
            // data instead of failing startup.
            github_token: env::var("GITHUB_TOKEN")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            leetcode_username: env::var("LEETCODE_USERNAME")
                .map_err(|_| ConfigError::Missing("LEETCODE_USERNAME"))?,
            gfg_username: env::var("GFG_USERNAME")
                .map_err(|_| ConfigError::Missing("GFG_USERNAME"))?,

            github_graphql_url: env::var("GITHUB_GRAPHQL_URL")
                .unwrap_or_else(|_| "https://api.github.com/graphql".to_string()),
            leetcode_base_url: env::var("LEETCODE_BASE_URL")
                .unwrap_or_else(|_| "https://leetcode.com".to_string()),
            gfg_base_url: env::var("GFG_BASE_URL")
                .unwrap_or_else(|_| "https://www.geeksforgeeks.org".to_string()),

            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            cache_ttl_minutes: env::var("CACHE_TTL_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            github_username: "octocat".to_string(),
            github_token: "test_token".to_string(),
            leetcode_username: "octocat".to_string(),
            gfg_username: "octocat".to_string(),
            github_graphql_url: "http://127.0.0.1:0/graphql".to_string(),
            leetcode_base_url: "http://127.0.0.1:0".to_string(),
            gfg_base_url: "http://127.0.0.1:0".to_string(),
            fetch_timeout_secs: 2,
            cache_ttl_minutes: 0,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("GITHUB_USERNAME", "octocat");
        env::set_var("LEETCODE_USERNAME", "octocat");
        env::set_var("GFG_USERNAME", "octocat");
        env::remove_var("GITHUB_TOKEN");
        env::remove_var("CACHE_TTL_MINUTES");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.github_username, "octocat");
        assert_eq!(config.github_token, "");
        assert_eq!(config.port, 8080);
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.cache_ttl_minutes, 30);
        assert_eq!(
            config.github_graphql_url,
            "https://api.github.com/graphql"
        );
    }
}
