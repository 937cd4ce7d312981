//! Durable key-value storage for the Terroa storefront.
//!
//! A [`KvStore`] holds raw bytes by key; [`Cache`] adds JSON serialization
//! on top, and [`DurableRecord`] wraps a single typed value under a fixed key.
//!
//! # Example
//!
//! ```rust
//! use terroa_cache::{Cache, DurableRecord};
//!
//! let cache = Cache::in_memory();
//! let record: DurableRecord<Vec<String>> = DurableRecord::new(cache, "recent.searches");
//!
//! assert_eq!(record.load(), None);
//! record.save(&vec!["azeite".to_string()]).unwrap();
//! assert_eq!(record.load_or_default().len(), 1);
//! ```

mod cache;
mod error;
mod kv;
mod record;

pub use cache::Cache;
pub use error::CacheError;
pub use kv::{FileStore, KvStore, MemoryStore};
pub use record::DurableRecord;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, DurableRecord, FileStore, KvStore, MemoryStore};
}
