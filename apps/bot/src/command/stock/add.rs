use stock::{FavoriteError, Favorites};
use tracing::{error, info, instrument, warn};

use crate::{Context, Error, reply};

/// Save a ticker to your favorites
#[poise::command(slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Ticker symbol (e.g., TSLA)"] symbol: String,
) -> Result<(), Error> {
    let Some(symbol) = reply::ticker_input(&symbol) else {
        ctx.say(reply::EMPTY_SYMBOL).await?;
        return Ok(());
    };

    // validation hits the provider
    ctx.defer().await?;

    let text = add_reply(&ctx.data().favorites, ctx.author().id.get(), symbol).await;

    ctx.say(text).await?;
    Ok(())
}

#[instrument(name = "add", skip(favorites))]
pub(super) async fn add_reply(favorites: &Favorites, user_id: u64, symbol: &str) -> String {
    info!("invoked");

    match favorites.add(user_id, symbol).await {
        Ok(()) => {
            info!("completed");
            reply::added(symbol)
        }
        Err(e @ FavoriteError::Storage(_)) => {
            error!(error = %e, "storage failure");
            reply::favorite_error(&e)
        }
        Err(e) => {
            warn!(error = %e, "rejected");
            reply::favorite_error(&e)
        }
    }
}
