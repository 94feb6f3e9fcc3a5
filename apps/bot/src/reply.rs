//! User-facing text for every command outcome.

use stock::{FavoriteError, FavoritePrice, MAX_FAVORITES, Quote, QuoteError};

pub const EMPTY_SYMBOL: &str = "Please give a ticker, for example `AAPL` or `SBER.ME`.";

/// Trimmed ticker, or None when nothing is left.
pub fn ticker_input(raw: &str) -> Option<&str> {
    let s = raw.trim();
    (!s.is_empty()).then_some(s)
}

pub fn help(version: &str) -> String {
    format!(
        "Hi! I look up stock prices ({version}).\n\
         `/stock price <ticker>` current price, e.g. `AAPL` or `SBER.ME`\n\
         `/stock add <ticker>` save a favorite (up to {MAX_FAVORITES})\n\
         `/stock remove <ticker>` drop a favorite\n\
         `/stock list` your favorites\n\
         `/stock prices` prices of all your favorites"
    )
}

pub fn price(symbol: &str, result: &Result<Quote, QuoteError>) -> String {
    match result {
        Ok(quote) => match &quote.change_percent {
            Some(change) => format!("Current price of {symbol}: {} ({change})", quote.price),
            None => format!("Current price of {symbol}: {}", quote.price),
        },
        Err(e) => format!("Error: {e}"),
    }
}

/// One line of `quote` binary output: `TICKER: PRICE` or `TICKER: error: REASON`.
pub fn console_line(symbol: &str, result: &Result<Quote, QuoteError>) -> String {
    match result {
        Ok(quote) => format!("{symbol}: {}", quote.price),
        Err(e) => format!("{symbol}: error: {e}"),
    }
}

pub fn added(symbol: &str) -> String {
    format!("Added {symbol} to favorites.")
}

pub fn removed(symbol: &str) -> String {
    format!("Removed {symbol} from favorites.")
}

pub fn favorite_error(err: &FavoriteError) -> String {
    match err {
        FavoriteError::AtCapacity => format!(
            "You already have {MAX_FAVORITES} favorites. Remove one with `/stock remove` first."
        ),
        FavoriteError::AlreadyExists(s) => format!("{s} is already in your favorites."),
        FavoriteError::SymbolNotFound(s) => {
            format!("Could not find a price for {s}. Check the ticker and try again.")
        }
        FavoriteError::EntryNotFound(s) => format!("{s} is not in your favorites."),
        FavoriteError::Storage(_) => "Favorites are unavailable right now, try again later.".into(),
    }
}

pub fn favorites(symbols: &[String]) -> String {
    if symbols.is_empty() {
        return "You have no favorites yet. Add one with `/stock add <ticker>`.".into();
    }

    let lines: Vec<String> = symbols
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect();
    format!("Your favorites:\n{}", lines.join("\n"))
}

pub fn favorite_prices(prices: &[FavoritePrice]) -> String {
    if prices.is_empty() {
        return favorites(&[]);
    }

    let lines: Vec<String> = prices
        .iter()
        .map(|p| format!("{}: {}", p.symbol, p.price))
        .collect();
    format!("Favorite prices:\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use stock::{PRICE_UNAVAILABLE, ProviderNotice};

    use super::*;

    fn quote(price: &str, change: Option<&str>) -> Quote {
        Quote {
            symbol: "AAPL".into(),
            price: price.into(),
            open: None,
            high: None,
            low: None,
            volume: None,
            latest_trading_day: None,
            previous_close: None,
            change: None,
            change_percent: change.map(String::from),
        }
    }

    #[test]
    fn ticker_input_trims() {
        assert_eq!(ticker_input("  SBER.ME \n"), Some("SBER.ME"));
        assert_eq!(ticker_input("   "), None);
        assert_eq!(ticker_input(""), None);
    }

    #[test]
    fn price_lines() {
        assert_eq!(
            price("AAPL", &Ok(quote("189.8400", None))),
            "Current price of AAPL: 189.8400"
        );
        assert_eq!(
            price("AAPL", &Ok(quote("189.8400", Some("-0.4512%")))),
            "Current price of AAPL: 189.8400 (-0.4512%)"
        );

        let err = QuoteError::Provider(ProviderNotice::RateLimit("5 calls per minute".into()));
        assert_eq!(
            price("AAPL", &Err(err)),
            "Error: provider rate limit note: 5 calls per minute"
        );
    }

    #[test]
    fn console_lines() {
        assert_eq!(
            console_line("IBM", &Ok(quote("168.9100", Some("1.05%")))),
            "IBM: 168.9100"
        );

        let err = QuoteError::Exhausted {
            attempts: 3,
            last: Box::new(QuoteError::PriceAbsent("SBER.ME".into())),
        };
        assert_eq!(
            console_line("SBER.ME", &Err(err)),
            "SBER.ME: error: failed to fetch price after 3 attempts: no price returned for SBER.ME"
        );
    }

    #[test]
    fn every_favorite_error_has_a_sentence() {
        let errors = [
            FavoriteError::AtCapacity,
            FavoriteError::AlreadyExists("AAPL".into()),
            FavoriteError::SymbolNotFound("AAPL".into()),
            FavoriteError::EntryNotFound("AAPL".into()),
            FavoriteError::Storage(anyhow::anyhow!("connection refused")),
        ];

        for err in &errors {
            assert!(!favorite_error(err).is_empty());
        }
        assert!(favorite_error(&errors[0]).contains('5'));
        assert!(!favorite_error(&errors[4]).contains("connection refused"));
    }

    #[test]
    fn favorites_listing() {
        assert!(favorites(&[]).starts_with("You have no favorites"));
        assert_eq!(
            favorites(&["TSLA".into(), "AAPL".into()]),
            "Your favorites:\n1. TSLA\n2. AAPL"
        );
    }

    #[test]
    fn price_listing_keeps_placeholders() {
        let prices = vec![
            FavoritePrice {
                symbol: "AAPL".into(),
                price: "189.84".into(),
            },
            FavoritePrice {
                symbol: "DELISTED".into(),
                price: PRICE_UNAVAILABLE.into(),
            },
        ];
        assert_eq!(
            favorite_prices(&prices),
            format!("Favorite prices:\nAAPL: 189.84\nDELISTED: {PRICE_UNAVAILABLE}")
        );
    }
}
