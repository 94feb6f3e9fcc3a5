use std::fmt;

use thiserror::Error;

use crate::favorites::MAX_FAVORITES;

/// Failure of a quote lookup.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Network failure, timeout or non-success HTTP status.
    #[error("request failed: {0}")]
    Transport(String),

    /// Body was not JSON in any shape the provider uses.
    #[error("malformed response: {0}")]
    MalformedPayload(String),

    /// Provider answered with an error message or a notice instead of a quote.
    #[error("{0}")]
    Provider(ProviderNotice),

    /// Well-formed quote envelope without a price.
    #[error("no price returned for {0}")]
    PriceAbsent(String),

    #[error("failed to fetch price after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<QuoteError>,
    },
}

impl QuoteError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QuoteError::Transport(_) | QuoteError::MalformedPayload(_) | QuoteError::PriceAbsent(_)
        )
    }
}

impl From<reqwest::Error> for QuoteError {
    // the request URL carries the API key
    fn from(err: reqwest::Error) -> Self {
        QuoteError::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::MalformedPayload(err.to_string())
    }
}

/// Message the provider sends in place of a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderNotice {
    /// `Error Message`, usually an unknown symbol or bad call.
    ErrorMessage(String),
    /// `Information`, usually a key or plan problem.
    Information(String),
    /// `Note`, the rate limit warning.
    RateLimit(String),
}

impl ProviderNotice {
    pub fn message(&self) -> &str {
        match self {
            ProviderNotice::ErrorMessage(m)
            | ProviderNotice::Information(m)
            | ProviderNotice::RateLimit(m) => m,
        }
    }
}

impl fmt::Display for ProviderNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderNotice::ErrorMessage(m) => write!(f, "provider error: {m}"),
            ProviderNotice::Information(m) => write!(f, "provider information: {m}"),
            ProviderNotice::RateLimit(m) => write!(f, "provider rate limit note: {m}"),
        }
    }
}

/// Failure of a favorites operation.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("favorites list is full ({} symbols max)", MAX_FAVORITES)]
    AtCapacity,

    #[error("{0} is already in favorites")]
    AlreadyExists(String),

    /// Validation lookup failed; the fetch error is intentionally dropped.
    #[error("symbol {0} was not found")]
    SymbolNotFound(String),

    #[error("{0} is not in favorites")]
    EntryNotFound(String),

    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for FavoriteError {
    fn from(err: anyhow::Error) -> Self {
        FavoriteError::Storage(err)
    }
}
