//! Key-value storage behind the `SET`/`GET`/`DEL` commands.

pub mod cache;
pub mod error;
pub mod memory;

pub use crate::cache::Cache;
pub use crate::error::StorageError;
pub use crate::memory::MemoryCache;
