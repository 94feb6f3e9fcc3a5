mod error;
mod favorites;
mod price_client;
mod quote;

pub mod store;

pub use error::{FavoriteError, ProviderNotice, QuoteError};
pub use favorites::{FavoritePrice, Favorites, MAX_FAVORITES, PRICE_PACING, PRICE_UNAVAILABLE};
pub use price_client::{
    DEFAULT_BASE_API, QuoteClient, QuoteSource, REQUEST_TIMEOUT, backoff, fetch_with_retry,
};
pub use quote::{GlobalQuote, Quote, QuoteEnvelope};
