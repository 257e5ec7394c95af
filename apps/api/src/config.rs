use anyhow::{Context, Result};

const DEFAULT_GENERATION_API_URL: &str = "https://api-inference.huggingface.co";
/// The model the text-generation pipeline loads when none is named.
const DEFAULT_GENERATION_MODEL: &str = "gpt2";
const DEFAULT_GENERATION_SEED: u64 = 42;

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup only fails on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub generation_api_url: String,
    pub generation_model: String,
    pub generation_api_token: Option<String>,
    /// `None` when `GENERATION_SEED=none`.
    pub generation_seed: Option<u64>,
    pub generation_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            generation_api_url: lookup("GENERATION_API_URL")
                .unwrap_or_else(|| DEFAULT_GENERATION_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            generation_model: lookup("GENERATION_MODEL")
                .unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string()),
            generation_api_token: lookup("GENERATION_API_TOKEN").filter(|t| !t.is_empty()),
            generation_seed: parse_seed(lookup("GENERATION_SEED"))?,
            generation_timeout_secs: lookup("GENERATION_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

fn parse_seed(raw: Option<String>) -> Result<Option<u64>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Some(DEFAULT_GENERATION_SEED)),
        Some(s) if s.eq_ignore_ascii_case("none") => Ok(None),
        Some(s) => s
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("GENERATION_SEED must be an unsigned integer or 'none', got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.generation_api_url, DEFAULT_GENERATION_API_URL);
        assert_eq!(config.generation_model, "gpt2");
        assert!(config.generation_api_token.is_none());
        assert_eq!(config.generation_seed, Some(42));
        assert_eq!(config.generation_timeout_secs, 120);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("GENERATION_API_URL", "http://localhost:8081/"),
            ("GENERATION_MODEL", ""),
            ("GENERATION_API_TOKEN", "hf_secret"),
            ("GENERATION_SEED", "7"),
            ("GENERATION_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.generation_api_url, "http://localhost:8081");
        assert_eq!(config.generation_model, "");
        assert_eq!(config.generation_api_token.as_deref(), Some("hf_secret"));
        assert_eq!(config.generation_seed, Some(7));
        assert_eq!(config.generation_timeout_secs, 5);
    }

    #[test]
    fn test_seed_can_be_disabled() {
        let config = config_from(&[("GENERATION_SEED", "None")]).unwrap();
        assert!(config.generation_seed.is_none());
    }

    #[test]
    fn test_empty_token_is_treated_as_unset() {
        let config = config_from(&[("GENERATION_API_TOKEN", "")]).unwrap();
        assert!(config.generation_api_token.is_none());
    }

    #[test]
    fn test_malformed_values_fail() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("GENERATION_SEED", "-1")]).is_err());
        assert!(config_from(&[("GENERATION_TIMEOUT_SECS", "soon")]).is_err());
    }
}
