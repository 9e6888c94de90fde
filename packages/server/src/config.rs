use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Per-IP request quota, applied to the masking routes only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub masking_enabled: bool,
    pub default_language: String,
    pub score_threshold: f64,
    pub max_body_bytes: usize,
    pub request_timeout_secs: u64,
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            masking_enabled: true,
            default_language: pii::DEFAULT_LANGUAGE.to_string(),
            score_threshold: 0.0,
            max_body_bytes: 1024 * 1024,
            request_timeout_secs: 30,
            rate_limit: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let score_threshold = parse_or(&lookup, "PII_SCORE_THRESHOLD", defaults.score_threshold)?;
        if !(0.0..=1.0).contains(&score_threshold) {
            bail!("PII_SCORE_THRESHOLD must be between 0.0 and 1.0");
        }

        let rate_limit = match lookup("RATE_LIMIT_PER_SECOND") {
            Some(raw) => {
                let per_second: u64 = raw
                    .trim()
                    .parse()
                    .context("RATE_LIMIT_PER_SECOND must be a valid number")?;
                if per_second == 0 {
                    bail!("RATE_LIMIT_PER_SECOND must be greater than zero");
                }
                let burst_size: u32 = parse_or(&lookup, "RATE_LIMIT_BURST", 20)?;
                if burst_size == 0 {
                    bail!("RATE_LIMIT_BURST must be greater than zero");
                }
                Some(RateLimitConfig {
                    per_second,
                    burst_size,
                })
            }
            None => None,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            masking_enabled: parse_or(&lookup, "PII_MASKING_ENABLED", defaults.masking_enabled)?,
            default_language: lookup("PII_DEFAULT_LANGUAGE")
                .map(|l| l.trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .unwrap_or(defaults.default_language),
            score_threshold,
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?,
            request_timeout_secs: parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            rate_limit,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}
