use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, info_span, instrument, warn};
use tracing_futures::Instrument;

use crate::error::FavoriteError;
use crate::price_client::{QuoteSource, fetch_with_retry};
use crate::store::{FavoriteEntry, FavoritesRepository, OwnerId};

/// Most symbols one owner may keep.
pub const MAX_FAVORITES: usize = 5;

/// Gap between consecutive quote requests in a batch, for the provider's rate limit.
pub const PRICE_PACING: Duration = Duration::from_millis(300);

/// Shown in place of a price that could not be fetched.
pub const PRICE_UNAVAILABLE: &str = "price unavailable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritePrice {
    pub symbol: String,
    /// Price string, or [`PRICE_UNAVAILABLE`].
    pub price: String,
}

impl FavoritePrice {
    pub fn is_available(&self) -> bool {
        self.price != PRICE_UNAVAILABLE
    }
}

/// Per-owner favorites validated against the quote source.
///
/// Symbols are compared exactly as given. Callers trim user input before it
/// gets here.
#[derive(Clone)]
pub struct Favorites {
    repo: Arc<dyn FavoritesRepository>,
    quotes: Arc<dyn QuoteSource>,
}

impl Favorites {
    pub fn new(repo: Arc<dyn FavoritesRepository>, quotes: Arc<dyn QuoteSource>) -> Self {
        Self { repo, quotes }
    }

    /// Add a symbol after checking capacity, duplicates and that the provider knows it.
    ///
    /// Count, existence check and insert are separate calls, so two
    /// concurrent adds for one owner can both pass the capacity check. The
    /// insert itself is conditional and never creates a duplicate row.
    #[instrument(skip(self))]
    pub async fn add(&self, owner: OwnerId, symbol: &str) -> Result<(), FavoriteError> {
        if self.repo.count(owner).await? >= MAX_FAVORITES {
            debug!("favorites at capacity");
            return Err(FavoriteError::AtCapacity);
        }

        if self.repo.exists(owner, symbol).await? {
            return Err(FavoriteError::AlreadyExists(symbol.to_string()));
        }

        if let Err(e) = fetch_with_retry(self.quotes.as_ref(), symbol, 1).await {
            warn!(error = %e, "symbol validation failed");
            return Err(FavoriteError::SymbolNotFound(symbol.to_string()));
        }

        let entry = FavoriteEntry {
            owner,
            symbol: symbol.to_string(),
            added_at: Utc::now(),
        };

        if !self.repo.insert(entry).await? {
            return Err(FavoriteError::AlreadyExists(symbol.to_string()));
        }

        info!("favorite added");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, owner: OwnerId, symbol: &str) -> Result<(), FavoriteError> {
        match self.repo.delete(owner, symbol).await? {
            0 => Err(FavoriteError::EntryNotFound(symbol.to_string())),
            _ => {
                info!("favorite removed");
                Ok(())
            }
        }
    }

    /// Symbols, most recently added first.
    pub async fn list(&self, owner: OwnerId) -> Result<Vec<String>, FavoriteError> {
        Ok(self
            .repo
            .list(owner)
            .await?
            .into_iter()
            .map(|e| e.symbol)
            .collect())
    }

    /// Latest price for each favorite, in [`Favorites::list`] order.
    ///
    /// Fetches run one at a time with [`PRICE_PACING`] between them. A failed
    /// fetch only affects its own row.
    #[instrument(skip(self))]
    pub async fn list_with_prices(&self, owner: OwnerId) -> Result<Vec<FavoritePrice>, FavoriteError> {
        let symbols = self.list(owner).await?;
        info!(total_symbols = symbols.len(), "loaded favorites");

        let mut prices = Vec::with_capacity(symbols.len());
        let mut failures = 0usize;

        for (i, symbol) in symbols.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(PRICE_PACING).await;
            }

            let span = info_span!("favorite_price", symbol = %symbol);
            let price = match fetch_with_retry(self.quotes.as_ref(), &symbol, 1)
                .instrument(span)
                .await
            {
                Ok(quote) => quote.price,
                Err(e) => {
                    failures += 1;
                    warn!(symbol = %symbol, error = %e, "price fetch failed");
                    PRICE_UNAVAILABLE.to_string()
                }
            };

            prices.push(FavoritePrice { symbol, price });
        }

        debug!(fetched = prices.len(), failures, "favorite prices done");
        Ok(prices)
    }
}
