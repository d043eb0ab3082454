use async_trait::async_trait;
use thiserror::Error;

pub mod key_value;
pub mod memory;

pub use key_value::SqlKeyValueRepository;
pub use memory::InMemoryKeyValueRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// String key-value storage backing the personalization record
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    /// Returns whether a value was removed
    async fn delete(&self, key: &str) -> Result<bool, RepositoryError>;
}
