//! Identity boundary: who is the current owner of the session.

use stockroom_core::OwnerId;

/// Supplies the signed-in owner. Authentication itself lives outside this
/// workspace; implementations only report its outcome.
pub trait IdentityProvider: Send + Sync {
    fn current_owner(&self) -> Option<OwnerId>;
}

/// Fixed identity, for tests, demos and single-user setups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    owner: Option<OwnerId>,
}

impl StaticIdentity {
    pub fn signed_in(owner: impl Into<OwnerId>) -> Self {
        Self {
            owner: Some(owner.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_owner(&self) -> Option<OwnerId> {
        self.owner.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_identity() {
        assert_eq!(StaticIdentity::signed_in("u1").current_owner(), Some(OwnerId::from("u1")));
        assert_eq!(StaticIdentity::anonymous().current_owner(), None);
    }
}
