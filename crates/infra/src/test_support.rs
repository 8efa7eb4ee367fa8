//! Shared fixtures for the infra unit tests.

use tenantscope_core::{
    DefaultSettings, Entity, StampToken, TenantDirectory, TenantEntry, TenantOwned, TenantSettings,
    TenantSlot,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Gadget {
    pub id: u32,
    pub name: String,
    tenant: TenantSlot,
}

impl Gadget {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            tenant: TenantSlot::unassigned(),
        }
    }

    /// A gadget whose slot already carries `tenant`, as if read from a client payload.
    pub fn claimed(id: u32, name: &str, tenant: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            tenant: serde_json::from_value(serde_json::json!(tenant)).unwrap(),
        }
    }
}

impl Entity for Gadget {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }
}

impl TenantOwned for Gadget {
    fn tenant_slot(&self) -> &TenantSlot {
        &self.tenant
    }

    fn tenant_slot_mut(&mut self, _: StampToken) -> &mut TenantSlot {
        &mut self.tenant
    }
}

/// `acme` uses the default target `cs0`; `globex` has its own target `cs2`;
/// `initech` shares the default target.
pub fn directory() -> TenantDirectory {
    TenantDirectory::load(TenantSettings {
        defaults: Some(DefaultSettings {
            connection_target: Some("cs0".into()),
            provider: Some("MSSQL".into()),
        }),
        tenants: vec![
            TenantEntry::new("acme"),
            TenantEntry::new("globex").with_connection_target("cs2"),
            TenantEntry::new("initech"),
        ],
    })
    .unwrap()
}
