//! Look up prices from the terminal without going through Discord.

use std::time::Duration;

use anyhow::Result;
use bot::{config::max_attempts_from_env, reply};
use clap::Parser;
use stock::QuoteClient;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quote", about = "Fetch the latest price for one or more tickers")]
struct Args {
    /// Ticker symbols, e.g. AAPL SBER.ME IBM
    #[arg(required = true)]
    symbols: Vec<String>,

    /// Attempts per ticker (defaults to QUOTE_MAX_ATTEMPTS or 3)
    #[arg(short, long)]
    attempts: Option<u32>,

    /// Pause between tickers in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();
    let attempts = match args.attempts {
        Some(n) => n,
        None => max_attempts_from_env()?,
    };
    let client = QuoteClient::from_env()?;

    let mut failed = 0usize;
    for (i, raw) in args.symbols.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
        }

        let Some(symbol) = reply::ticker_input(raw) else {
            continue;
        };

        let result = client.fetch_quote(symbol, attempts).await;
        if result.is_err() {
            failed += 1;
        }
        println!("{}", reply::console_line(symbol, &result));
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} lookups failed", args.symbols.len());
    }
    Ok(())
}
