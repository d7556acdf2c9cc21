use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api_base_url`.
pub const API_BASE_ENV: &str = "LEETDASH_API_BASE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_problem_base_url")]
    pub problem_base_url: String,
    #[serde(default = "default_tick_rate")]
    pub tick_rate_fps: f64,
    /// Per-request timeout. Unset leaves it to the HTTP client.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Username fetched on startup when none is given on the command line.
    #[serde(default)]
    pub default_username: Option<String>,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_problem_base_url() -> String {
    "https://leetcode.com".to_string()
}

fn default_tick_rate() -> f64 {
    30.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            problem_base_url: default_problem_base_url(),
            tick_rate_fps: default_tick_rate(),
            request_timeout_secs: None,
            default_username: None,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/leetdash"))
}

/// Return candidate .env paths in priority order.
fn env_file_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = config_dir() {
        paths.push(dir.join(".env"));
    }
    paths.push(PathBuf::from(".env"));
    paths
}

/// Load .env files. Variables already set in the environment win, and
/// earlier files win over later ones.
pub fn load_env_files() {
    for path in env_file_paths() {
        if path.exists()
            && let Err(e) = dotenvy::from_path(&path)
        {
            tracing::warn!(path = %path.display(), "failed to load env file: {e}");
        }
    }
}

/// Load `~/.config/leetdash/config.toml`, then apply environment overrides.
pub fn load_config() -> AppConfig {
    load_env_files();

    let mut config = config_dir()
        .map(|dir| dir.join("config.toml"))
        .and_then(|path| fs::read_to_string(path).ok())
        .map(|contents| parse_config(&contents))
        .unwrap_or_default();

    if let Ok(base) = std::env::var(API_BASE_ENV)
        && !base.trim().is_empty()
    {
        config.api_base_url = base.trim().to_string();
    }
    config
}

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!("ignoring invalid config.toml: {e}");
        AppConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("");
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.problem_base_url, "https://leetcode.com");
        assert_eq!(config.tick_rate_fps, 30.0);
        assert!(config.request_timeout().is_none());
        assert!(config.default_username.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config(
            r#"
            api_base_url = "https://alfa-leetcode-api.example"
            request_timeout_secs = 10
            default_username = "alice"
            "#,
        );
        assert_eq!(config.api_base_url, "https://alfa-leetcode-api.example");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.default_username.as_deref(), Some("alice"));
        assert_eq!(config.tick_rate_fps, 30.0);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let config = parse_config("tick_rate_fps = \"fast\"");
        assert_eq!(config.tick_rate_fps, 30.0);
    }
}
