use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::common::DEFAULT_BLOCKED_SITES;
use crate::domains::content::fetcher::DEFAULT_USER_AGENT;
use crate::domains::content::DEFAULT_MAX_CONTENT_CHARS;
use crate::kernel::gemini_client::DEFAULT_GEMINI_MODEL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub max_content_chars: usize,
    pub blocked_sites: Vec<String>,
    pub settle_delay: Duration,
    pub rate_limit_enabled: bool,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            fetch_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            blocked_sites: DEFAULT_BLOCKED_SITES.iter().map(|s| s.to_string()).collect(),
            settle_delay: Duration::from_millis(1500),
            rate_limit_enabled: true,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
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

    /// Build configuration from an arbitrary variable source, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: match var("PORT") {
                Some(port) => port.trim().parse::<u16>().context("PORT must be a valid number")?,
                None => defaults.port,
            },
            fetch_timeout: match var("FETCH_TIMEOUT_SECS") {
                Some(secs) => Duration::from_secs(
                    secs.trim()
                        .parse::<u64>()
                        .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.fetch_timeout,
            },
            user_agent: var("FETCH_USER_AGENT").unwrap_or(defaults.user_agent),
            max_content_chars: match var("MAX_CONTENT_CHARS") {
                Some(chars) => chars
                    .trim()
                    .parse::<usize>()
                    .context("MAX_CONTENT_CHARS must be a valid number")?,
                None => defaults.max_content_chars,
            },
            blocked_sites: var("BLOCKED_SITES")
                .map(|list| {
                    list.split(',')
                        .map(|site| site.trim().to_string())
                        .filter(|site| !site.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.blocked_sites),
            settle_delay: match var("SETTLE_DELAY_MS") {
                Some(ms) => Duration::from_millis(
                    ms.trim()
                        .parse::<u64>()
                        .context("SETTLE_DELAY_MS must be a valid number")?,
                ),
                None => defaults.settle_delay,
            },
            rate_limit_enabled: match var("RATE_LIMIT_ENABLED") {
                Some(flag) => parse_flag(&flag).context("RATE_LIMIT_ENABLED must be true or false")?,
                None => defaults.rate_limit_enabled,
            },
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
