use std::{sync::Arc, time::Duration};

use anyhow::Result;
use bot::{Data, command::stock::stock_command, config::Config};
use poise::{Framework, FrameworkOptions};
use serenity::all::{ActivityData, ClientBuilder, GatewayIntents};
use stock::{
    Favorites, QuoteClient,
    store::{FavoritesRepository, MemoryFavorites, RedisFavorites},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let repo: Arc<dyn FavoritesRepository> = match &config.redis_url {
        Some(_) => Arc::new(RedisFavorites::from_env().await?),
        None => {
            warn!("REDIS_URL not set, favorites are kept in memory only");
            Arc::new(MemoryFavorites::new())
        }
    };
    let quote_client = Arc::new(QuoteClient::from_env()?);
    let favorites = Arc::new(Favorites::new(Arc::clone(&repo), quote_client.clone()));

    let intents = GatewayIntents::non_privileged();
    let commands = vec![stock_command()];

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands,
            on_error: |err| {
                Box::pin(async move {
                    if let Err(e) = poise::builtins::on_error(err).await {
                        error!(error = %e, "error handler failed");
                    }
                })
            },
            ..Default::default()
        })
        .setup({
            let favorites = Arc::clone(&favorites);
            let quote_client = Arc::clone(&quote_client);
            let config = config.clone();

            move |ctx, ready, framework| {
                let favorites = Arc::clone(&favorites);
                let quote_client = Arc::clone(&quote_client);
                let config = config.clone();

                Box::pin(async move {
                    info!(user = %ready.user.name, id = %ready.user.id, "connected");

                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                    let ctx_clone = ctx.clone();
                    let version = config.version.clone();
                    tokio::spawn(async move {
                        let mut show_version = true;
                        let mut tick = tokio::time::interval(Duration::from_secs(30));

                        loop {
                            tick.tick().await;

                            let text = if show_version {
                                if version.starts_with('v') {
                                    version.clone()
                                } else {
                                    format!("Version - {}", version)
                                }
                            } else {
                                let now = chrono::Local::now();
                                format!("Time - {}", now.format("%H:%M (%:z)"))
                            };

                            ctx_clone.set_activity(Some(ActivityData::custom(text)));
                            show_version = !show_version;
                        }
                    });

                    Ok(Data {
                        favorites,
                        quote_client,
                        max_attempts: config.max_attempts,
                        version: config.version,
                    })
                })
            }
        })
        .build();

    let mut client = ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(why) = client.start().await {
            error!("Client error: {why:?}");
        }
    });

    shutdown_signal().await;

    info!("Shutting down");
    shard_manager.shutdown_all().await;
    if let Err(e) = repo.close().await {
        warn!(error = %e, "closing favorites store failed");
    }

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::{
            select,
            signal::unix::{SignalKind, signal},
        };
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    error!(error = %e, "failed to install signal handlers, using ctrl-c");
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
