//! Key-value persistence for client state.
//!
//! Everything the app remembers between sessions goes through
//! [`SettingsStore`]. Values are plain strings; structured records are
//! stored as JSON through [`SettingsStoreExt`].

pub mod error;
pub mod file;
pub mod keys;
pub mod memory;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use crate::error::StoreError;
pub use crate::file::FileStore;
pub use crate::memory::MemoryStore;

pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

pub trait SettingsStoreExt: SettingsStore {
    /// Reads and decodes a JSON value. A value that does not decode is a
    /// [`StoreError::Decode`]; callers decide whether that is fatal.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.get(key)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
                    key: key.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    /// Serializes `value` and stores it in a single write.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.set(key, &serde_json::to_string(value)?)
    }
}

impl<S: SettingsStore + ?Sized> SettingsStoreExt for S {}
