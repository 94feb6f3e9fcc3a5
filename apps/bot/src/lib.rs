use std::sync::Arc;

use stock::{Favorites, QuoteClient};

pub mod command;
pub mod config;
pub mod reply;

pub struct Data {
    pub favorites: Arc<Favorites>,
    pub quote_client: Arc<QuoteClient>,
    pub max_attempts: u32,
    pub version: String,
}

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;
