use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;

/// The storage capability consumed by the command layer.
///
/// Implementations are shared between all connections, so every method takes
/// `&self` and must be safe to call concurrently.
#[async_trait]
pub trait Cache: Send + Sync {
	/// Store `value` under `key`, replacing any previous value.
	async fn set(&self, key: Bytes, value: Bytes) -> Result<(), StorageError>;

	/// Look up `key`. `Ok(None)` means the key does not exist.
	async fn get(&self, key: &Bytes) -> Result<Option<Bytes>, StorageError>;

	/// Remove `key`, returning whether it existed.
	async fn del(&self, key: &Bytes) -> Result<bool, StorageError>;
}
