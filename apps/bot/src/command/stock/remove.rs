use stock::{FavoriteError, Favorites};
use tracing::{error, info, instrument, warn};

use crate::{Context, Error, reply};

/// Drop a ticker from your favorites
#[poise::command(slash_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Ticker symbol to remove"] symbol: String,
) -> Result<(), Error> {
    let Some(symbol) = reply::ticker_input(&symbol) else {
        ctx.say(reply::EMPTY_SYMBOL).await?;
        return Ok(());
    };

    let text = remove_reply(&ctx.data().favorites, ctx.author().id.get(), symbol).await;

    ctx.say(text).await?;
    Ok(())
}

#[instrument(name = "remove", skip(favorites))]
pub(super) async fn remove_reply(favorites: &Favorites, user_id: u64, symbol: &str) -> String {
    info!("invoked");

    match favorites.remove(user_id, symbol).await {
        Ok(()) => reply::removed(symbol),
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
