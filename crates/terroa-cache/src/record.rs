//! Single durable records with tolerant loading.

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use tracing::{debug, warn};

/// One typed value stored under a fixed key.
///
/// Loading never fails: a missing record and a record that cannot be read
/// or parsed both load as `None`, the latter with a warning.
#[derive(Debug, Clone)]
pub struct DurableRecord<T> {
    cache: Cache,
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> DurableRecord<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the record.
    pub fn load(&self) -> Option<T> {
        match self.cache.get::<T>(&self.key) {
            Ok(Some(value)) => {
                debug!(key = %self.key, "loaded durable record");
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring unreadable durable record");
                None
            }
        }
    }

    /// Read the record, falling back to `T::default()`.
    pub fn load_or_default(&self) -> T
    where
        T: Default,
    {
        self.load().unwrap_or_default()
    }

    /// Replace the stored value.
    pub fn save(&self, value: &T) -> Result<(), CacheError> {
        self.cache.set(&self.key, value)
    }

    /// Delete the stored value.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileStore;
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Company {
        name: String,
    }

    #[test]
    fn test_absent_record_loads_none() {
        let record: DurableRecord<Company> =
            DurableRecord::new(Cache::in_memory(), "settings.company");
        assert_eq!(record.load(), None);
        assert_eq!(record.load_or_default(), Company::default());
    }

    #[test]
    fn test_malformed_record_loads_none() {
        let cache = Cache::in_memory();
        cache.store().set("settings.company", b"{\"name\":").unwrap();
        let record: DurableRecord<Company> = DurableRecord::new(cache, "settings.company");
        assert_eq!(record.load(), None);
    }

    #[test]
    fn test_save_load_clear_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        let record = DurableRecord::new(cache.clone(), "settings.company");

        record
            .save(&Company {
                name: "Terroá".to_string(),
            })
            .unwrap();

        let reopened: DurableRecord<Company> = DurableRecord::new(
            Cache::new(Arc::new(FileStore::open(dir.path()).unwrap())),
            "settings.company",
        );
        assert_eq!(reopened.load().map(|c| c.name), Some("Terroá".to_string()));

        record.clear().unwrap();
        assert_eq!(reopened.load(), None);
    }
}
