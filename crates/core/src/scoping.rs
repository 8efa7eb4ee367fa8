//! Tenant scoping policy: read filtering and write stamping.
//!
//! The policy is stateless; all tenant context comes from the
//! [`ActiveTenantBinding`] passed in. Repositories apply it on every standard
//! read and commit path, so callers never opt in per query or per entity type.

use tracing::debug;

use crate::entity::{StampToken, TenantOwned};
use crate::error::{TenancyError, TenancyResult};
use crate::id::TenantId;
use crate::resolver::ActiveTenantBinding;

/// Tenant-equality filter for one binding.
///
/// Entities that were never stamped never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantPredicate {
    tenant_id: TenantId,
}

impl TenantPredicate {
    pub fn matches<E: TenantOwned + ?Sized>(&self, entity: &E) -> bool {
        entity.tenant_id() == Some(&self.tenant_id)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScopingPolicy;

impl ScopingPolicy {
    pub fn filter_predicate(binding: &ActiveTenantBinding) -> TenantPredicate {
        TenantPredicate {
            tenant_id: binding.tenant_id().clone(),
        }
    }

    /// Stamps a not-yet-persisted entity with the active tenant.
    ///
    /// The overwrite is unconditional: whatever the caller put in the slot is discarded.
    pub fn stamp_on_insert<E: TenantOwned + ?Sized>(entity: &mut E, binding: &ActiveTenantBinding) {
        let previous = entity.tenant_slot_mut(StampToken::new()).stamp(binding.tenant_id().clone());
        if let Some(previous) = previous.filter(|p| p != binding.tenant_id()) {
            debug!(
                tenant_id = %binding.tenant_id(),
                discarded = %previous,
                "discarded caller-supplied tenant id on insert"
            );
        }
    }

    /// Fails unless `entity` belongs to the bound tenant.
    pub fn ensure_owned<E: TenantOwned + ?Sized>(
        entity: &E,
        binding: &ActiveTenantBinding,
    ) -> TenancyResult<()> {
        if Self::filter_predicate(binding).matches(entity) {
            Ok(())
        } else {
            Err(TenancyError::CrossTenantAccess {
                tenant_id: binding.tenant_id().clone(),
            })
        }
    }

    /// Fails if an update would change the tenant of an already persisted entity.
    pub fn verify_unchanged<E: TenantOwned + ?Sized>(stored: &E, incoming: &E) -> TenancyResult<()> {
        if stored.tenant_id() == incoming.tenant_id() {
            return Ok(());
        }
        Err(TenancyError::TenantReassignment {
            stored: display(stored.tenant_id()),
            attempted: display(incoming.tenant_id()),
        })
    }
}

fn display(id: Option<&TenantId>) -> String {
    id.map(|t| t.to_string()).unwrap_or_else(|| "<none>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::TenantDirectory;
    use crate::entity::{Entity, StampToken, TenantSlot};
    use crate::resolver::resolve;
    use crate::settings::{DefaultSettings, TenantEntry, TenantSettings};
    use proptest::prelude::*;
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Widget {
        id: u32,
        name: String,
        #[serde(default)]
        tenant_id: TenantSlot,
    }

    impl Widget {
        fn new(id: u32) -> Self {
            Self {
                id,
                name: format!("widget-{id}"),
                tenant_id: TenantSlot::unassigned(),
            }
        }
    }

    impl Entity for Widget {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    impl TenantOwned for Widget {
        fn tenant_slot(&self) -> &TenantSlot {
            &self.tenant_id
        }

        fn tenant_slot_mut(&mut self, _: StampToken) -> &mut TenantSlot {
            &mut self.tenant_id
        }
    }

    fn directory(ids: &[String]) -> TenantDirectory {
        TenantDirectory::load(TenantSettings {
            defaults: Some(DefaultSettings {
                connection_target: Some("cs0".into()),
                provider: Some("MSSQL".into()),
            }),
            tenants: ids.iter().map(|id| TenantEntry::new(id.clone())).collect(),
        })
        .unwrap()
    }

    fn scenario() -> TenantDirectory {
        directory(&["acme".to_string(), "globex".to_string()])
    }

    #[test]
    fn stamping_discards_attacker_supplied_tenant() {
        let mut widget: Widget =
            serde_json::from_str(r#"{"Id":7,"Name":"Widget","TenantId":"attacker-supplied"}"#).unwrap();
        let binding = resolve(Some("acme"), &scenario()).unwrap();

        ScopingPolicy::stamp_on_insert(&mut widget, &binding);

        assert_eq!(widget.tenant_id().unwrap().as_str(), "acme");
        assert_eq!(widget.name, "Widget");
        assert_eq!(*widget.id(), 7);
    }

    #[test]
    fn predicate_rejects_unstamped_entities() {
        let binding = resolve(Some("acme"), &scenario()).unwrap();
        let predicate = ScopingPolicy::filter_predicate(&binding);
        assert!(!predicate.matches(&Widget::new(1)));
    }

    #[test]
    fn ensure_owned_rejects_other_tenants() {
        let dir = scenario();
        let acme = resolve(Some("acme"), &dir).unwrap();
        let globex = resolve(Some("globex"), &dir).unwrap();

        let mut widget = Widget::new(1);
        ScopingPolicy::stamp_on_insert(&mut widget, &acme);

        assert!(ScopingPolicy::ensure_owned(&widget, &acme).is_ok());
        assert_eq!(
            ScopingPolicy::ensure_owned(&widget, &globex).unwrap_err(),
            TenancyError::CrossTenantAccess {
                tenant_id: TenantId::new("globex")
            }
        );
    }

    #[test]
    fn verify_unchanged_detects_reassignment() {
        let dir = scenario();
        let mut stored = Widget::new(1);
        ScopingPolicy::stamp_on_insert(&mut stored, &resolve(Some("acme"), &dir).unwrap());

        let mut moved = stored.clone();
        ScopingPolicy::stamp_on_insert(&mut moved, &resolve(Some("globex"), &dir).unwrap());

        assert!(ScopingPolicy::verify_unchanged(&stored, &stored.clone()).is_ok());
        let err = ScopingPolicy::verify_unchanged(&stored, &moved).unwrap_err();
        assert!(matches!(err, TenancyError::TenantReassignment { .. }));
    }

    #[test]
    fn concurrent_bindings_never_see_each_others_rows() {
        let dir = Arc::new(scenario());

        let handles: Vec<_> = ["acme", "globex"]
            .into_iter()
            .map(|tenant| {
                let dir = Arc::clone(&dir);
                std::thread::spawn(move || {
                    let binding = resolve(Some(tenant), &dir).unwrap();
                    (0..50)
                        .map(|i| {
                            let mut w = Widget::new(i);
                            ScopingPolicy::stamp_on_insert(&mut w, &binding);
                            w
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let rows: Vec<Widget> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let acme = ScopingPolicy::filter_predicate(&resolve(Some("acme"), &dir).unwrap());
        let globex = ScopingPolicy::filter_predicate(&resolve(Some("globex"), &dir).unwrap());

        assert_eq!(rows.iter().filter(|w| acme.matches(*w)).count(), 50);
        assert_eq!(rows.iter().filter(|w| globex.matches(*w)).count(), 50);
        assert!(rows.iter().all(|w| acme.matches(w) != globex.matches(w)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: after stamping, the entity carries the binding's id,
        /// whatever it held before.
        #[test]
        fn stamp_overwrites_any_prior_value(prior in prop::option::of("[ -~]{0,20}")) {
            let dir = scenario();
            let binding = resolve(Some("globex"), &dir).unwrap();

            let json = match &prior {
                Some(p) => serde_json::json!({"Id": 1, "Name": "w", "TenantId": p}),
                None => serde_json::json!({"Id": 1, "Name": "w"}),
            };
            let mut widget: Widget = serde_json::from_value(json).unwrap();

            ScopingPolicy::stamp_on_insert(&mut widget, &binding);
            prop_assert_eq!(widget.tenant_id(), Some(binding.tenant_id()));
        }

        /// Property: predicates of two distinct bindings admit disjoint sets.
        #[test]
        fn distinct_bindings_filter_disjoint_sets(
            ids in prop::collection::hash_set("[a-z]{1,8}", 2..6),
            assignments in prop::collection::vec(0usize..64, 1..64)
        ) {
            let ids: Vec<String> = ids.into_iter().collect();
            let dir = directory(&ids);
            let bindings: Vec<_> = ids.iter().map(|id| resolve(Some(id), &dir).unwrap()).collect();

            let widgets: Vec<Widget> = assignments
                .iter()
                .enumerate()
                .map(|(i, slot)| {
                    let mut w = Widget::new(i as u32);
                    ScopingPolicy::stamp_on_insert(&mut w, &bindings[slot % bindings.len()]);
                    w
                })
                .collect();

            for (a, b) in bindings.iter().zip(bindings.iter().skip(1)) {
                let pa = ScopingPolicy::filter_predicate(a);
                let pb = ScopingPolicy::filter_predicate(b);
                for w in &widgets {
                    prop_assert!(!(pa.matches(w) && pb.matches(w)));
                }
            }
        }
    }
}
