use std::time::Duration;

use anyhow::{Context, Error, Result};
use async_trait::async_trait;
use chrono::DateTime;
use fred::prelude::*;
use fred::types::SetOptions;
use tracing::{error, info};

use super::{FavoriteEntry, FavoritesRepository, OwnerId};

/// Favorites kept in Redis, one sorted set per owner scored by the
/// millisecond timestamp the symbol was added at.
#[derive(Clone)]
pub struct RedisFavorites {
    client: Client,
    key_prefix: String,
}

impl RedisFavorites {
    pub async fn new(redis_url: &str, key: impl Into<String>) -> Result<Self> {
        let config = Config::from_url(redis_url)?;

        let client = Builder::from_config(config)
            .with_connection_config(|config| {
                config.connection_timeout = Duration::from_secs(5);
                config.tcp = TcpConfig {
                    nodelay: Some(true),
                    ..Default::default()
                };
            })
            .build()?;

        client.on_error(|(error, server)| async move {
            error!(?server, ?error, "redis connection error");
            Ok(())
        });

        client.connect();
        client.wait_for_connect().await?;

        let key_prefix = key.into();
        info!(prefix = %key_prefix, "favorites store connected");

        Ok(Self { client, key_prefix })
    }

    /// Create a new RedisFavorites from environment variables.
    /// Expects REDIS_URL and REDIS_KEY_PREFIX to be set.
    pub async fn from_env() -> Result<Self> {
        use std::env;

        let redis_url = env::var("REDIS_URL")
            .map_err(|_| Error::msg("REDIS_URL environment variable not set"))?;
        let key_prefix = env::var("REDIS_KEY_PREFIX")
            .map_err(|_| Error::msg("REDIS_KEY_PREFIX environment variable not set"))?;

        Self::new(&redis_url, key_prefix).await
    }

    fn favorites_key(&self, owner: OwnerId) -> String {
        format!("{}:favorites:{}", self.key_prefix, owner)
    }
}

#[async_trait]
impl FavoritesRepository for RedisFavorites {
    async fn count(&self, owner: OwnerId) -> Result<usize> {
        let count: i64 = self
            .client
            .zcard(self.favorites_key(owner))
            .await
            .context("ZCARD favorites")?;
        Ok(count as usize)
    }

    async fn exists(&self, owner: OwnerId, symbol: &str) -> Result<bool> {
        let score: Option<f64> = self
            .client
            .zscore(self.favorites_key(owner), symbol)
            .await
            .context("ZSCORE favorites")?;
        Ok(score.is_some())
    }

    async fn insert(&self, entry: FavoriteEntry) -> Result<bool> {
        let score = entry.added_at.timestamp_millis() as f64;

        // NX keeps the score, and so added_at, of a member that is already there
        let added: i64 = self
            .client
            .zadd(
                self.favorites_key(entry.owner),
                Some(SetOptions::NX),
                None,
                false,
                false,
                (score, entry.symbol.as_str()),
            )
            .await
            .context("ZADD NX favorites")?;

        Ok(added == 1)
    }

    async fn delete(&self, owner: OwnerId, symbol: &str) -> Result<u64> {
        let removed: i64 = self
            .client
            .zrem(self.favorites_key(owner), symbol)
            .await
            .context("ZREM favorites")?;
        Ok(removed.max(0) as u64)
    }

    async fn list(&self, owner: OwnerId) -> Result<Vec<FavoriteEntry>> {
        let members: Vec<(String, f64)> = self
            .client
            .zrevrange(self.favorites_key(owner), 0, -1, true)
            .await
            .context("ZREVRANGE favorites")?;

        Ok(members
            .into_iter()
            .map(|(symbol, score)| FavoriteEntry {
                owner,
                symbol,
                added_at: DateTime::from_timestamp_millis(score as i64).unwrap_or_default(),
            })
            .collect())
    }

    async fn close(&self) -> Result<()> {
        self.client.quit().await.context("QUIT favorites store")?;
        info!("favorites store closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};

    use super::*;

    async fn connect(test: &str) -> RedisFavorites {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        let prefix = format!("stock-test:{test}:{}", Utc::now().timestamp_nanos_opt().unwrap());
        RedisFavorites::new(&url, prefix).await.unwrap()
    }

    fn entry(owner: OwnerId, symbol: &str, age_secs: i64) -> FavoriteEntry {
        // the store keeps millisecond precision
        let at = Utc::now() - ChronoDuration::seconds(age_secs);
        FavoriteEntry {
            owner,
            symbol: symbol.to_string(),
            added_at: DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap(),
        }
    }

    #[tokio::test]
    #[ignore = "needs a redis server at REDIS_URL"]
    async fn second_insert_keeps_original_timestamp() {
        let store = connect("insert").await;
        let first = entry(1, "AAPL", 120);

        assert!(store.insert(first.clone()).await.unwrap());
        assert!(!store.insert(entry(1, "AAPL", 0)).await.unwrap());

        assert_eq!(store.count(1).await.unwrap(), 1);
        assert!(store.exists(1, "AAPL").await.unwrap());
        assert_eq!(store.list(1).await.unwrap(), vec![first]);

        store.delete(1, "AAPL").await.unwrap();
        store.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "needs a redis server at REDIS_URL"]
    async fn list_is_newest_first_with_timestamps() {
        let store = connect("list").await;
        let ibm = entry(2, "IBM", 30);
        let aapl = entry(2, "AAPL", 90);
        let tsla = entry(2, "TSLA", 0);
        for e in [ibm.clone(), aapl.clone(), tsla.clone()] {
            assert!(store.insert(e).await.unwrap());
        }

        assert_eq!(store.list(2).await.unwrap(), vec![tsla, ibm, aapl]);
        assert!(store.list(3).await.unwrap().is_empty());

        for symbol in ["IBM", "AAPL", "TSLA"] {
            store.delete(2, symbol).await.unwrap();
        }
        store.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "needs a redis server at REDIS_URL"]
    async fn delete_reports_rows_removed() {
        let store = connect("delete").await;
        store.insert(entry(4, "MSFT", 0)).await.unwrap();

        assert_eq!(store.delete(4, "msft").await.unwrap(), 0);
        assert_eq!(store.delete(4, "MSFT").await.unwrap(), 1);
        assert_eq!(store.delete(4, "MSFT").await.unwrap(), 0);
        assert_eq!(store.count(4).await.unwrap(), 0);

        store.close().await.unwrap();
    }
}
