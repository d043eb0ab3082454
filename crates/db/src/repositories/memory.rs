use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{KeyValueRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryKeyValueRepository {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl KeyValueRepository for InMemoryKeyValueRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, RepositoryError> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(key).is_some())
    }
}
