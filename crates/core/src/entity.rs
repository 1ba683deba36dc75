//! Entity trait: identity + continuity across state changes.

use crate::id::OwnerId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity that belongs to exactly one owner.
///
/// Identity is only meaningful together with the owner: two owners may reuse
/// the same `id`.
pub trait Owned: Entity {
    fn owner_id(&self) -> &OwnerId;

    /// True when this entity is the one addressed by `(id, owner)`.
    fn is_addressed_by(&self, id: &Self::Id, owner: &OwnerId) -> bool {
        self.id() == id && self.owner_id() == owner
    }
}
