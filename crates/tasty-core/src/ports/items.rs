//! Positional item store

use crate::pagination::Page;
use crate::Result;
use async_trait::async_trait;
use tasty_types::Item;

/// Ordered item list addressed by 1-based position.
///
/// Positions outside `[1, len]` are `NotFound`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn list(&self, page: Page) -> Vec<Item>;
    async fn create(&self, item: Item) -> Item;
    async fn get(&self, position: i64) -> Result<Item>;
    async fn replace(&self, position: i64, item: Item) -> Result<Item>;
    async fn remove(&self, position: i64) -> Result<Item>;
    async fn len(&self) -> usize;
}
