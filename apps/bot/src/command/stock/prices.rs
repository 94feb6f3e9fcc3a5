use stock::Favorites;
use tracing::{error, info, instrument};

use crate::{Context, Error, reply};

/// Latest prices of all your favorites
#[poise::command(slash_command)]
pub async fn prices(ctx: Context<'_>) -> Result<(), Error> {
    // one provider call per favorite, paced
    ctx.defer().await?;

    let text = prices_reply(&ctx.data().favorites, ctx.author().id.get()).await;

    ctx.say(text).await?;
    Ok(())
}

#[instrument(name = "prices", skip(favorites))]
pub(super) async fn prices_reply(favorites: &Favorites, user_id: u64) -> String {
    info!("invoked");

    match favorites.list_with_prices(user_id).await {
        Ok(prices) => {
            let missing = prices.iter().filter(|p| !p.is_available()).count();
            info!(count = prices.len(), missing, "completed");
            reply::favorite_prices(&prices)
        }
        Err(e) => {
            error!(error = %e, "failed");
            reply::favorite_error(&e)
        }
    }
}
