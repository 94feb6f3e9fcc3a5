//! Persistence for favorites: one row per (owner, symbol) with the time it
//! was added. Backends are injected into [`crate::Favorites`] at startup and
//! closed explicitly on shutdown.

mod memory;
mod redis;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use memory::MemoryFavorites;
pub use redis::RedisFavorites;

/// Chat user a favorites list belongs to.
pub type OwnerId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub owner: OwnerId,
    pub symbol: String,
    pub added_at: DateTime<Utc>,
}

#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Number of entries the owner has.
    async fn count(&self, owner: OwnerId) -> Result<usize>;

    async fn exists(&self, owner: OwnerId, symbol: &str) -> Result<bool>;

    /// Insert unless the (owner, symbol) row is already there.
    /// Returns false, leaving the existing row untouched, if it was.
    async fn insert(&self, entry: FavoriteEntry) -> Result<bool>;

    /// Returns the number of rows removed.
    async fn delete(&self, owner: OwnerId, symbol: &str) -> Result<u64>;

    /// Entries ordered by `added_at`, newest first.
    async fn list(&self, owner: OwnerId) -> Result<Vec<FavoriteEntry>>;

    async fn close(&self) -> Result<()>;
}
