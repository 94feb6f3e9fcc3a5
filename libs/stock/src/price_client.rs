use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::QuoteError;
use crate::quote::{Quote, QuoteEnvelope};

pub const DEFAULT_BASE_API: &str = "https://www.alphavantage.co";

/// Per-request timeout, separate from the retry budget.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One attempt at getting a quote.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_once(&self, symbol: &str) -> Result<Quote, QuoteError>;
}

/// Delay before the attempt that follows `attempt` (1-based).
pub fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(u64::from(attempt) * 2)
}

/// Fetch with linear backoff. Provider notices end the call immediately.
#[instrument(skip(source), level = "debug")]
pub async fn fetch_with_retry<S>(
    source: &S,
    symbol: &str,
    max_attempts: u32,
) -> Result<Quote, QuoteError>
where
    S: QuoteSource + ?Sized,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        debug!(attempt, max_attempts, "fetching quote");

        let err = match source.fetch_once(symbol).await {
            Ok(quote) => return Ok(quote),
            Err(e) if !e.is_retryable() => {
                warn!(attempt, error = %e, "quote rejected by provider");
                return Err(e);
            }
            Err(e) => e,
        };

        warn!(attempt, max_attempts, error = %err, "quote attempt failed");

        if attempt >= max_attempts {
            return Err(QuoteError::Exhausted {
                attempts: max_attempts,
                last: Box::new(err),
            });
        }

        let delay = backoff(attempt);
        debug!(?delay, "waiting before retry");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_api: String,
    api_key: String,
}

impl QuoteClient {
    pub fn new(base_api: String, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_api,
            api_key,
        })
    }

    /// Expects ALPHA_VANTAGE_API_KEY; ALPHA_VANTAGE_BASE_URL is optional.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ALPHA_VANTAGE_API_KEY")
            .map_err(|_| anyhow::Error::msg("ALPHA_VANTAGE_API_KEY environment variable not set"))?;
        let base_api = std::env::var("ALPHA_VANTAGE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_API.to_string());
        Self::new(base_api, api_key)
    }

    pub async fn fetch_quote(&self, symbol: &str, max_attempts: u32) -> Result<Quote, QuoteError> {
        fetch_with_retry(self, symbol, max_attempts).await
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn fetch_once(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let url = format!("{}/query", self.base_api.trim_end_matches('/'));

        let body = self
            .client
            .get(url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        QuoteEnvelope::from_slice(&body)?.into_quote(symbol)
    }
}
