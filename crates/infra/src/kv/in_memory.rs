use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;

use super::KeyValueStore;

/// In-memory key/value store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let map = self.inner.read().map_err(|_| anyhow!("key/value store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        let mut map = self.inner.write().map_err(|_| anyhow!("key/value store lock poisoned"))?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut map = self.inner.write().map_err(|_| anyhow!("key/value store lock poisoned"))?;
        map.remove(key);
        Ok(())
    }
}
