use stock::{QuoteSource, fetch_with_retry};
use tracing::{info, instrument, warn};

use crate::{Context, Error, reply};

/// Current price of a ticker
#[poise::command(slash_command)]
pub async fn price(
    ctx: Context<'_>,
    #[description = "Ticker symbol (e.g., AAPL or SBER.ME)"] symbol: String,
) -> Result<(), Error> {
    let Some(symbol) = reply::ticker_input(&symbol) else {
        ctx.say(reply::EMPTY_SYMBOL).await?;
        return Ok(());
    };

    ctx.defer().await?;

    let data = ctx.data();
    let text = price_reply(
        data.quote_client.as_ref(),
        data.max_attempts,
        ctx.author().id.get(),
        symbol,
    )
    .await;

    ctx.say(text).await?;
    Ok(())
}

#[instrument(name = "price", skip(quotes))]
pub(super) async fn price_reply<S>(
    quotes: &S,
    max_attempts: u32,
    user_id: u64,
    symbol: &str,
) -> String
where
    S: QuoteSource + ?Sized,
{
    info!("invoked");

    let result = fetch_with_retry(quotes, symbol, max_attempts).await;
    match &result {
        Ok(quote) => info!(price = %quote.price, "fetched"),
        Err(e) => warn!(error = %e, "failed"),
    }

    reply::price(symbol, &result)
}
