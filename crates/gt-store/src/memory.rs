//! In-process `KeyValueStore` for tests, demos, and single-node deployments.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// A `HashMap` behind an `RwLock`.  Never returns
/// [`Unavailable`](crate::StoreError::Unavailable).
#[derive(Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self
            .map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }
}
