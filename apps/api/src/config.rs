use std::num::NonZeroUsize;
use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_REPORT_CACHE_CAPACITY: usize = 256;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Strict mode applied when a request does not set it.
    pub default_strict_mode: bool,
    pub max_upload_bytes: usize,
    pub report_cache_capacity: NonZeroUsize,
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            rust_log: "info".to_string(),
            default_strict_mode: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            report_cache_capacity: NonZeroUsize::new(DEFAULT_REPORT_CACHE_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let capacity: usize = parse_env("REPORT_CACHE_CAPACITY", defaults.report_cache_capacity.get())?;

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            default_strict_mode: parse_env("DEFAULT_STRICT_MODE", defaults.default_strict_mode)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            report_cache_capacity: NonZeroUsize::new(capacity)
                .context("REPORT_CACHE_CAPACITY must be at least 1")?,
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }
}

/// Reads `key` and parses it, falling back to `default` when unset.
fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert!(!config.default_strict_mode);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.report_cache_capacity.get(), 256);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins(" http://localhost:3000, ,http://127.0.0.1:5173 "),
            vec!["http://localhost:3000", "http://127.0.0.1:5173"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_env_falls_back_and_rejects_garbage() {
        let key = "ATS_API_TEST_PARSE_ENV_UNSET";
        assert_eq!(parse_env(key, 42u16).unwrap(), 42);

        let key = "ATS_API_TEST_PARSE_ENV_BAD";
        std::env::set_var(key, "not-a-number");
        let err = parse_env::<u16>(key, 1).unwrap_err();
        assert!(err.to_string().contains(key));
        std::env::remove_var(key);
    }
}
