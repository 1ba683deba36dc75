//! String key/value storage boundary used for state persistence.
//!
//! Values are opaque serialized documents; the store makes no assumptions
//! about their shape.

pub mod file;
pub mod in_memory;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

use std::sync::Arc;

/// Durable string key/value storage.
pub trait KeyValueStore: Send + Sync {
    /// Stored value for `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        (**self).remove(key)
    }
}
