use serde::Deserialize;

use crate::error::{ProviderNotice, QuoteError};

/// Latest quote for one symbol. Values are kept as the provider's strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub symbol: String,
    pub price: String,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub volume: Option<String>,
    pub latest_trading_day: Option<String>,
    pub previous_close: Option<String>,
    pub change: Option<String>,
    pub change_percent: Option<String>,
}

//
// Match Alpha Vantage GLOBAL_QUOTE JSON
// https://www.alphavantage.co/documentation/#latestprice
//
// A quote response and an error response share one top level object, so
// both shapes are folded into a single struct and told apart by which
// fields are populated.
//
#[derive(Debug, Deserialize, Default)]
pub struct QuoteEnvelope {
    #[serde(rename = "Global Quote", default)]
    pub global_quote: Option<GlobalQuote>,

    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,

    #[serde(rename = "Information", default)]
    pub information: Option<String>,

    #[serde(rename = "Note", default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol", default)]
    pub symbol: String,

    #[serde(rename = "02. open", default)]
    pub open: String,

    #[serde(rename = "03. high", default)]
    pub high: String,

    #[serde(rename = "04. low", default)]
    pub low: String,

    #[serde(rename = "05. price", default)]
    pub price: String,

    #[serde(rename = "06. volume", default)]
    pub volume: String,

    #[serde(rename = "07. latest trading day", default)]
    pub latest_trading_day: String,

    #[serde(rename = "08. previous close", default)]
    pub previous_close: String,

    #[serde(rename = "09. change", default)]
    pub change: String,

    #[serde(rename = "10. change percent", default)]
    pub change_percent: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn present(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl QuoteEnvelope {
    pub fn from_slice(body: &[u8]) -> Result<Self, QuoteError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// First populated error field, checked in the order the provider documents them.
    pub fn notice(&self) -> Option<ProviderNotice> {
        if let Some(m) = non_empty(&self.error_message) {
            return Some(ProviderNotice::ErrorMessage(m.to_string()));
        }
        if let Some(m) = non_empty(&self.information) {
            return Some(ProviderNotice::Information(m.to_string()));
        }
        non_empty(&self.note).map(|m| ProviderNotice::RateLimit(m.to_string()))
    }

    /// Resolve the envelope into a quote. Provider notices win over any quote data.
    pub fn into_quote(self, requested: &str) -> Result<Quote, QuoteError> {
        if let Some(notice) = self.notice() {
            return Err(QuoteError::Provider(notice));
        }

        let gq = self.global_quote.unwrap_or_default();
        if gq.price.trim().is_empty() {
            return Err(QuoteError::PriceAbsent(requested.to_string()));
        }

        let symbol = if gq.symbol.is_empty() {
            requested.to_string()
        } else {
            gq.symbol
        };

        Ok(Quote {
            symbol,
            price: gq.price,
            open: present(gq.open),
            high: present(gq.high),
            low: present(gq.low),
            volume: present(gq.volume),
            latest_trading_day: present(gq.latest_trading_day),
            previous_close: present(gq.previous_close),
            change: present(gq.change),
            change_percent: present(gq.change_percent),
        })
    }
}
