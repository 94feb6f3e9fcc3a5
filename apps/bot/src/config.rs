use std::env::var;

use anyhow::{Context, Result};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub version: String,
    /// Retry budget for direct price lookups.
    pub max_attempts: u32,
    /// Favorites live in memory when unset.
    pub redis_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            discord_token: var("DISCORD_TOKEN").context("DISCORD_TOKEN not set")?,
            version: var("APP_VERSION").unwrap_or_else(|_| "Unknown".to_string()),
            max_attempts: max_attempts_from_env()?,
            redis_url: var("REDIS_URL").ok().filter(|s| !s.trim().is_empty()),
        })
    }
}

/// QUOTE_MAX_ATTEMPTS, falling back to [`DEFAULT_MAX_ATTEMPTS`].
pub fn max_attempts_from_env() -> Result<u32> {
    parse_max_attempts(var("QUOTE_MAX_ATTEMPTS").ok().as_deref())
}

fn parse_max_attempts(raw: Option<&str>) -> Result<u32> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_MAX_ATTEMPTS),
        Some(s) => {
            let n: u32 = s
                .parse()
                .with_context(|| format!("QUOTE_MAX_ATTEMPTS is not a number: {s}"))?;
            anyhow::ensure!(n > 0, "QUOTE_MAX_ATTEMPTS must be at least 1");
            Ok(n)
        }
    }
}
