use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::cache::Cache;
use crate::error::StorageError;

/// In-process [`Cache`] backed by a sharded concurrent map.
///
/// `max_keys` caps the number of distinct keys; `0` means unlimited. Overwriting
/// an existing key never counts against the cap.
#[derive(Debug, Default)]
pub struct MemoryCache {
	entries: DashMap<Bytes, Bytes>,
	len: AtomicUsize,
	max_keys: usize,
}

impl MemoryCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_keys(max_keys: usize) -> Self {
		Self {
			max_keys,
			..Self::default()
		}
	}

	pub fn max_keys(&self) -> usize {
		self.max_keys
	}

	/// Number of keys currently stored.
	pub fn len(&self) -> usize {
		self.len.load(Ordering::Acquire)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	// Claims a slot for a new key, failing once the cap is reached.
	fn reserve_slot(&self) -> Result<(), StorageError> {
		let max_keys = self.max_keys;
		self.len
			.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
				(max_keys == 0 || n < max_keys).then_some(n + 1)
			})
			.map(|_| ())
			.map_err(|_| StorageError::CapacityExceeded { max_keys })
	}
}

#[async_trait]
impl Cache for MemoryCache {
	async fn set(&self, key: Bytes, value: Bytes) -> Result<(), StorageError> {
		match self.entries.entry(key) {
			Entry::Occupied(mut entry) => {
				entry.insert(value);
			}
			Entry::Vacant(entry) => {
				if let Err(e) = self.reserve_slot() {
					log::debug!(
						"rejecting new key {:?}: {}",
						String::from_utf8_lossy(entry.key()),
						e
					);
					return Err(e);
				}
				entry.insert(value);
			}
		}
		Ok(())
	}

	async fn get(&self, key: &Bytes) -> Result<Option<Bytes>, StorageError> {
		Ok(self.entries.get(key).map(|entry| entry.value().clone()))
	}

	async fn del(&self, key: &Bytes) -> Result<bool, StorageError> {
		if self.entries.remove(key).is_some() {
			self.len.fetch_sub(1, Ordering::AcqRel);
			return Ok(true);
		}
		Ok(false)
	}
}
