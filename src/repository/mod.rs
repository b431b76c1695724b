pub mod dynamo_store;
pub mod errors;
pub mod memory_store;

use async_trait::async_trait;

use crate::models::Item;

pub use dynamo_store::DynamoCarStore;
pub use errors::StoreError;
pub use memory_store::MemoryCarStore;

/// Key-value table holding car items keyed by their `id` attribute.
///
/// Every call is a single atomic backend operation; nothing here retries.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// Returns every item in one pass.
    async fn scan(&self) -> Result<Vec<Item>, StoreError>;

    /// Inserts or silently overwrites the item under its `id`.
    async fn put(&self, item: Item) -> Result<(), StoreError>;

    /// Sets `attributes` on the item under `id`. An absent item is created
    /// with just the key and these attributes.
    async fn update(&self, id: &str, attributes: Item) -> Result<(), StoreError>;

    /// Deletes the item under `id`, failing with
    /// [`StoreError::ConditionFailed`] when it does not exist.
    async fn delete_existing(&self, id: &str) -> Result<(), StoreError>;
}
