// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The same configuration drives both halves of the crate: the API client
//! (backend base URL, timeouts, where session state lives on disk) and the
//! edge server (port, static bundle, route guard path lists).

use crate::middleware::guard::GuardConfig;
use std::env;
use std::path::PathBuf;

/// Default base URL of the wellness backend during local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend REST API (no trailing slash)
    pub api_base_url: String,
    /// Edge server port
    pub port: u16,
    /// Directory holding the built front-end bundle
    pub static_dir: PathBuf,
    /// Directory for the persisted session snapshot and cookie jar
    pub session_dir: PathBuf,
    /// Path prefixes that require a token cookie
    pub protected_paths: Vec<String>,
    /// Path prefixes only reachable without a token cookie
    pub auth_paths: Vec<String>,
    /// Per-request timeout for backend calls
    pub request_timeout_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        let guard = GuardConfig::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            port: 3000,
            static_dir: PathBuf::from("dist"),
            session_dir: PathBuf::from(".kinfit"),
            protected_paths: guard.protected_paths,
            auth_paths: guard.auth_paths,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development. Path list overrides
    /// are comma separated; unset lists fall back to the guard defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = GuardConfig::default();

        let api_base_url = env::var("API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "API_BASE_URL",
                reason: format!("expected an http(s) URL, got {api_base_url:?}"),
            });
        }

        let port = match env::var("PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("not a port number: {v:?}"),
            })?,
            Err(_) => 3000,
        };

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                reason: format!("not a number of seconds: {v:?}"),
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            api_base_url,
            port,
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dist")),
            session_dir: env::var("SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".kinfit")),
            protected_paths: env::var("PROTECTED_PATHS")
                .map(|v| parse_path_list(&v))
                .unwrap_or(defaults.protected_paths),
            auth_paths: env::var("AUTH_PATHS")
                .map(|v| parse_path_list(&v))
                .unwrap_or(defaults.auth_paths),
            request_timeout_secs,
        })
    }

    /// Route guard configuration derived from the path lists.
    pub fn guard_config(&self) -> GuardConfig {
        GuardConfig {
            protected_paths: self.protected_paths.clone(),
            auth_paths: self.auth_paths.clone(),
            ..GuardConfig::default()
        }
    }
}

/// Split a comma separated list of path prefixes, dropping empty entries.
fn parse_path_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.starts_with('/') {
                p.to_string()
            } else {
                format!("/{p}")
            }
        })
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_list() {
        assert_eq!(
            parse_path_list(" /home, tasks ,,/plans/"),
            vec!["/home", "/tasks", "/plans/"]
        );
        assert!(parse_path_list("").is_empty());
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("API_BASE_URL", "https://api.example.com/api/");
        env::set_var("PORT", "4100");
        env::set_var("PROTECTED_PATHS", "/home,/tasks");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.port, 4100);
        assert_eq!(config.protected_paths, vec!["/home", "/tasks"]);
        assert_eq!(config.guard_config().protected_paths.len(), 2);

        env::remove_var("API_BASE_URL");
        env::remove_var("PORT");
        env::remove_var("PROTECTED_PATHS");
    }
}
