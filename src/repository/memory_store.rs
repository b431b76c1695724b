use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CarStore, StoreError};
use crate::constants::KEY_ATTRIBUTE;
use crate::models::{AttributeValue, Item};

/// Process-local table. Scans return items ordered by id.
#[derive(Default)]
pub struct MemoryCarStore {
    items: RwLock<BTreeMap<String, Item>>,
}

impl MemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn get(&self, id: &str) -> Option<Item> {
        self.items.read().await.get(id).cloned()
    }
}

#[async_trait]
impl CarStore for MemoryCarStore {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn put(&self, item: Item) -> Result<(), StoreError> {
        let id = item
            .get(KEY_ATTRIBUTE)
            .and_then(AttributeValue::as_str)
            .ok_or_else(|| {
                StoreError::Malformed(format!("item has no string '{}' attribute", KEY_ATTRIBUTE))
            })?
            .to_string();

        self.items.write().await.insert(id, item);
        Ok(())
    }

    async fn update(&self, id: &str, attributes: Item) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let item = items.entry(id.to_string()).or_insert_with(|| {
            let mut fresh = Item::new();
            fresh.insert(KEY_ATTRIBUTE.to_string(), AttributeValue::S(id.to_string()));
            fresh
        });
        item.extend(attributes);
        Ok(())
    }

    async fn delete_existing(&self, id: &str) -> Result<(), StoreError> {
        match self.items.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::condition_failed(id)),
        }
    }
}
