//! Typed JSON documents on top of a [`KeyValueStore`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::kv::KeyValueStore;

/// Storage key of the record list.
pub const PRODUCTS_KEY: &str = "products";
/// Storage key of the activity log.
pub const ACTIVITY_KEY: &str = "activity";
/// Storage key of the stats histories.
pub const STATS_KEY: &str = "stats";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage backend failed: {0:#}")]
    Storage(#[from] anyhow::Error),

    #[error("failed to decode {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads and saves serde documents under well-known keys.
#[derive(Debug, Clone)]
pub struct StateRepository<S> {
    store: S,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the document at `key`; a key never written yields `T::default()`.
    pub fn load<T>(&self, key: &str) -> Result<T, PersistenceError>
    where
        T: DeserializeOwned + Default,
    {
        match self.store.get(key)? {
            Some(text) => serde_json::from_str(&text).map_err(|source| PersistenceError::Decode {
                key: key.to_string(),
                source,
            }),
            None => {
                tracing::debug!(key, "no stored document; starting empty");
                Ok(T::default())
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let text = serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, text)?;
        Ok(())
    }
}
