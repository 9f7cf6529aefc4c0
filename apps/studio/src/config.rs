use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_STATE_DIR: &str = ".resume-studio";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the resume service, without the `/api` suffix.
    pub api_base_url: String,
    /// Directory holding `resume-storage.json` and `auth-storage.json`.
    pub state_dir: PathBuf,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let api_base_url = require("API_BASE_URL")?;
        let parsed = url::Url::parse(&api_base_url)
            .with_context(|| format!("API_BASE_URL is not a valid URL: {api_base_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("API_BASE_URL must use http or https, got '{}'", parsed.scheme());
        }

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            api_base_url,
            state_dir: lookup("STUDIO_STATE_DIR")
                .unwrap_or_else(|| DEFAULT_STATE_DIR.to_string())
                .into(),
            request_timeout: Duration::from_secs(request_timeout),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup(&[("API_BASE_URL", "http://localhost:8000")])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.state_dir, PathBuf::from(".resume-studio"));
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_base_url_fails() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("API_BASE_URL"));
    }

    #[test]
    fn test_rejects_bad_url_and_timeout() {
        assert!(Config::from_lookup(lookup(&[("API_BASE_URL", "not a url")])).is_err());
        assert!(
            Config::from_lookup(lookup(&[("API_BASE_URL", "ftp://files.example.com")])).is_err()
        );
        assert!(Config::from_lookup(lookup(&[
            ("API_BASE_URL", "https://api.example.com"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("API_BASE_URL", "https://api.example.com"),
            ("STUDIO_STATE_DIR", "/tmp/studio"),
            ("REQUEST_TIMEOUT_SECS", "30"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/tmp/studio"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.rust_log, "debug");
    }
}
