//! Entity traits: identity, plus tenant ownership for tenant-scoped records.

use serde::{Deserialize, Serialize};

use crate::id::TenantId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Tenant ownership cell carried by every tenant-owned entity.
///
/// Application code can read the slot but never write it: the only mutation
/// is [`crate::ScopingPolicy::stamp_on_insert`]. A value may still arrive
/// through deserialization (e.g. a client payload); it is discarded when the
/// entity is stamped at insert time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantSlot(Option<TenantId>);

impl TenantSlot {
    /// A slot that has not been stamped yet.
    pub fn unassigned() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<&TenantId> {
        self.0.as_ref()
    }

    pub fn is_assigned(&self) -> bool {
        self.0.is_some()
    }

    /// Overwrites the slot, returning whatever value it held before.
    pub(crate) fn stamp(&mut self, tenant_id: TenantId) -> Option<TenantId> {
        self.0.replace(tenant_id)
    }
}

/// Proof of access to a [`TenantSlot`] for writing.
///
/// Only this crate can construct one, so only the scoping policy can reach
/// `&mut TenantSlot` through [`TenantOwned::tenant_slot_mut`].
#[derive(Debug)]
pub struct StampToken(());

impl StampToken {
    pub(crate) fn new() -> Self {
        Self(())
    }
}

/// A domain record whose rows belong to exactly one tenant.
///
/// Implementors expose their [`TenantSlot`]; the scoping policy and the
/// generic repository do the rest, so new entity types are protected without
/// any per-type filtering or stamping code.
///
/// Application code cannot reassign the slot of an entity:
///
/// ```compile_fail
/// use tenantscope_core::{TenantOwned, TenantSlot};
///
/// fn reassign<E: TenantOwned>(entity: &mut E, slot: TenantSlot) {
///     *entity.tenant_slot_mut() = slot;
/// }
/// ```
///
/// and cannot forge the token that would allow it:
///
/// ```compile_fail
/// use tenantscope_core::{StampToken, TenantOwned, TenantSlot};
///
/// fn reassign<E: TenantOwned>(entity: &mut E, slot: TenantSlot) {
///     *entity.tenant_slot_mut(StampToken(())) = slot;
/// }
/// ```
pub trait TenantOwned: Entity {
    fn tenant_slot(&self) -> &TenantSlot;

    /// Write access for the scoping policy; callable only with a [`StampToken`].
    fn tenant_slot_mut(&mut self, token: StampToken) -> &mut TenantSlot;

    fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_slot().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_replaces_previous_value() {
        let mut slot: TenantSlot = serde_json::from_str("\"attacker-supplied\"").unwrap();
        let previous = slot.stamp(TenantId::new("acme"));
        assert_eq!(previous, Some(TenantId::new("attacker-supplied")));
        assert_eq!(slot.get(), Some(&TenantId::new("acme")));
    }

    #[test]
    fn missing_value_deserializes_as_unassigned() {
        let slot: TenantSlot = serde_json::from_str("null").unwrap();
        assert!(!slot.is_assigned());
    }
}
