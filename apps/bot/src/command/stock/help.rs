use crate::{Context, Error, reply};

/// Show what the bot can do
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(reply::help(&ctx.data().version)).await?;
    Ok(())
}
