//! Infrastructure layer: state persistence and identity adapters.

pub mod identity;
pub mod kv;
pub mod persistence;

pub use identity::{IdentityProvider, StaticIdentity};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
pub use persistence::{ACTIVITY_KEY, PRODUCTS_KEY, PersistenceError, STATS_KEY, StateRepository};
