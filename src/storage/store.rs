//! Key-value store abstraction.
//!
//! The original front end kept everything in a browser-wide string store.
//! Here the store is an injected dependency with a two-method interface.

use std::collections::HashMap;

use crate::error::EngineResult;

/// A string-keyed byte store.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> EngineResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: Vec<u8>) -> EngineResult<()>;
}

/// A [`KeyValueStore`] held in memory.
///
/// # Example
///
/// ```
/// use attendance_engine::storage::{InMemoryStore, KeyValueStore};
///
/// let mut store = InMemoryStore::new();
/// assert_eq!(store.get("missing").unwrap(), None);
///
/// store.put("greeting", b"hello".to_vec()).unwrap();
/// assert_eq!(store.get("greeting").unwrap(), Some(b"hello".to_vec()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: HashMap<String, Vec<u8>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no keys are held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> EngineResult<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> EngineResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
