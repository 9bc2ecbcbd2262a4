use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
	#[error("OOM key limit of {max_keys} reached, cannot store new key")]
	CapacityExceeded { max_keys: usize },
}
