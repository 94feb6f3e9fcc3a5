use stock::Favorites;
use tracing::{debug, error, instrument};

use crate::{Context, Error, reply};

/// List your favorite tickers
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let text = list_reply(&ctx.data().favorites, ctx.author().id.get()).await;

    ctx.say(text).await?;
    Ok(())
}

#[instrument(name = "list", skip(favorites))]
pub(super) async fn list_reply(favorites: &Favorites, user_id: u64) -> String {
    match favorites.list(user_id).await {
        Ok(symbols) => {
            debug!(count = symbols.len(), "loaded");
            reply::favorites(&symbols)
        }
        Err(e) => {
            error!(error = %e, "failed");
            reply::favorite_error(&e)
        }
    }
}
