//! Key-value persistence for the storefront.
//!
//! All server state (catalog, users, carts, favorites, orders) lives in a
//! flat key-value namespace of JSON values. [`Store`] is the cheaply
//! cloneable handle handlers use; the backend is swappable via [`KvStore`]:
//! an in-memory map for tests and a JSON-file-backed map for the binary.
//!
//! # Key layout
//!
//! - `products`, `categories`, `banners`, `news` - catalog collections
//! - `reviews:{product_id}` - reviews per product
//! - `user:{email}` - registered users
//! - `cart:{email}` - cart line records
//! - `favorites:{email}` - favorite product ids
//! - `orders:{email}` - order history
//! - `seq:{name}` - id sequence counters

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur in the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value did not (de)serialize.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Backend interface: a flat map of string keys to JSON values.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be read.
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be written.
    fn set_raw(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be written.
    fn remove_raw(&self, key: &str) -> Result<(), StoreError>;

    /// Whether the store holds no keys at all.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be read.
    fn is_empty(&self) -> Result<bool, StoreError>;
}

/// Cloneable typed handle over a [`KvStore`] backend.
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn KvStore>,
}

impl Store {
    /// Wrap an arbitrary backend.
    #[must_use]
    pub fn new(inner: Arc<dyn KvStore>) -> Self {
        Self { inner }
    }

    /// Create an in-memory store (used by tests).
    #[must_use]
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    /// Open a JSON-file-backed store, loading existing contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file exists but cannot be read or
    /// parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(Arc::new(JsonFileStore::open(path)?)))
    }

    /// Read and deserialize the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or when the stored value
    /// does not match `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.inner
            .get_raw(key)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    /// Serialize and store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.inner.set_raw(key, serde_json::to_value(value)?)
    }

    /// Remove the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove_raw(key)
    }

    /// Whether the store holds no keys at all (fresh file, needs seeding).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.inner.is_empty()
    }

    /// Allocate the next id from the named sequence counter.
    ///
    /// Counters start at 1. Not atomic across processes; the server is the
    /// single writer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    pub fn next_id(&self, sequence: &str) -> Result<i64, StoreError> {
        let key = format!("seq:{sequence}");
        let next = self.get::<i64>(&key)?.unwrap_or(0) + 1;
        self.set(&key, &next)?;
        Ok(next)
    }
}

/// In-memory backend.
#[derive(Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, Value>>,
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let map = self.map.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.map.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.map.write().map_err(|_| StoreError::Poisoned)?;
        map.remove(key);
        Ok(())
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        let map = self.map.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.is_empty())
    }
}

/// JSON-file-backed backend.
///
/// The whole map is rewritten on every mutation. Fine for a catalog-sized
/// dataset; the write happens under the map lock so file contents always
/// match memory.
pub struct JsonFileStore {
    path: PathBuf,
    map: RwLock<HashMap<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing contents if the file
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let map = if path.exists() {
            let bytes = std::fs::read(&path)?;
            serde_json::from_slice(&bytes)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            map: RwLock::new(map),
        })
    }

    fn persist(&self, map: &HashMap<String, Value>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(map)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let map = self.map.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.map.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_owned(), value);
        self.persist(&map)
    }

    fn remove_raw(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.map.write().map_err(|_| StoreError::Poisoned)?;
        map.remove(key);
        self.persist(&map)
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        let map = self.map.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.is_empty())
    }
}
