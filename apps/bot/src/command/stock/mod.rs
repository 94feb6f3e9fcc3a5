mod add;
mod help;
mod list;
mod price;
mod prices;
mod remove;

use crate::{Context, Error};
use add::add;
use help::help;
use list::list;
use price::price;
use prices::prices;
use remove::remove;

#[poise::command(
    slash_command,
    rename = "stock",
    subcommands("price", "add", "remove", "list", "prices", "help")
)]
pub async fn stock_command(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}
