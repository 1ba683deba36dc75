//! Events emitted by state transitions.

use chrono::{DateTime, Utc};

use crate::id::OwnerId;

/// A fact produced by a mutation, scoped to one owner.
///
/// Events are immutable and versioned. Side effects that follow a mutation
/// (activity coalescing, stats snapshots) are driven from events rather than
/// from the mutation call itself.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "inventory.record.added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// Owner whose collection the event belongs to.
    fn owner_id(&self) -> &OwnerId;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
