use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FavoriteEntry, FavoritesRepository, OwnerId};

/// Process-local favorites. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryFavorites {
    // per owner, in insertion order
    rows: RwLock<HashMap<OwnerId, Vec<FavoriteEntry>>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesRepository for MemoryFavorites {
    async fn count(&self, owner: OwnerId) -> Result<usize> {
        Ok(self.rows.read().await.get(&owner).map_or(0, Vec::len))
    }

    async fn exists(&self, owner: OwnerId, symbol: &str) -> Result<bool> {
        Ok(self
            .rows
            .read()
            .await
            .get(&owner)
            .is_some_and(|rows| rows.iter().any(|e| e.symbol == symbol)))
    }

    async fn insert(&self, entry: FavoriteEntry) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let owned = rows.entry(entry.owner).or_default();

        if owned.iter().any(|e| e.symbol == entry.symbol) {
            return Ok(false);
        }

        owned.push(entry);
        Ok(true)
    }

    async fn delete(&self, owner: OwnerId, symbol: &str) -> Result<u64> {
        let mut rows = self.rows.write().await;
        let Some(owned) = rows.get_mut(&owner) else {
            return Ok(0);
        };

        let before = owned.len();
        owned.retain(|e| e.symbol != symbol);
        let removed = (before - owned.len()) as u64;

        if owned.is_empty() {
            rows.remove(&owner);
        }

        Ok(removed)
    }

    async fn list(&self, owner: OwnerId) -> Result<Vec<FavoriteEntry>> {
        let mut entries: Vec<FavoriteEntry> = self
            .rows
            .read()
            .await
            .get(&owner)
            .map(|rows| rows.iter().rev().cloned().collect())
            .unwrap_or_default();

        // stable, so equal timestamps stay newest-inserted first
        entries.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        Ok(entries)
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn entry(owner: OwnerId, symbol: &str, age_secs: i64) -> FavoriteEntry {
        FavoriteEntry {
            owner,
            symbol: symbol.to_string(),
            added_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[tokio::test]
    async fn insert_is_conditional() {
        let repo = MemoryFavorites::new();
        let first = entry(1, "AAPL", 60);

        assert!(repo.insert(first.clone()).await.unwrap());
        assert!(!repo.insert(entry(1, "AAPL", 0)).await.unwrap());

        let rows = repo.list(1).await.unwrap();
        assert_eq!(rows, vec![first]);
    }

    #[tokio::test]
    async fn owners_are_isolated() {
        let repo = MemoryFavorites::new();
        repo.insert(entry(1, "AAPL", 0)).await.unwrap();
        repo.insert(entry(2, "MSFT", 0)).await.unwrap();

        assert_eq!(repo.count(1).await.unwrap(), 1);
        assert!(repo.exists(2, "MSFT").await.unwrap());
        assert!(!repo.exists(1, "MSFT").await.unwrap());
        assert_eq!(repo.delete(1, "MSFT").await.unwrap(), 0);
        assert_eq!(repo.count(2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = MemoryFavorites::new();
        repo.insert(entry(7, "IBM", 30)).await.unwrap();
        repo.insert(entry(7, "AAPL", 90)).await.unwrap();
        repo.insert(entry(7, "TSLA", 0)).await.unwrap();

        let symbols: Vec<String> = repo
            .list(7)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.symbol)
            .collect();
        assert_eq!(symbols, ["TSLA", "IBM", "AAPL"]);
    }

    #[tokio::test]
    async fn symbols_match_exactly() {
        let repo = MemoryFavorites::new();
        repo.insert(entry(1, "AAPL", 0)).await.unwrap();

        assert!(!repo.exists(1, "aapl").await.unwrap());
        assert!(!repo.exists(1, " AAPL").await.unwrap());
        assert_eq!(repo.delete(1, "aapl").await.unwrap(), 0);
        assert_eq!(repo.delete(1, "AAPL").await.unwrap(), 1);
        assert_eq!(repo.count(1).await.unwrap(), 0);
    }
}
