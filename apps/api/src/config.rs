use std::time::Duration;

use anyhow::{bail, Context, Result};
use secrecy::Secret;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
///
/// Nothing here is required: without `GEMINI_API_KEY` the service runs in
/// sample mode and answers every request from the fallback templates.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<Secret<String>>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub generation_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(Secret::new);

        let timeout_secs = match lookup("GENERATION_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("GENERATION_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            generation_timeout: Duration::from_secs(timeout_secs),
            port: lookup("PORT")
                .unwrap_or_else(|| "6000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_any_variables() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.port, 6000);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_blank_api_key_means_sample_mode() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")])).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_api_key_enables_model_mode() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "abc123")])).unwrap();
        assert!(config.gemini_api_key.is_some());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("GENERATION_TIMEOUT_SECS", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_timeout_and_model() {
        let config = Config::from_lookup(lookup_from(&[
            ("GENERATION_TIMEOUT_SECS", "12"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
        ]))
        .unwrap();
        assert_eq!(config.generation_timeout, Duration::from_secs(12));
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
    }
}
