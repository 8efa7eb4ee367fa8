use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use tenantscope_core::{Entity, StampToken, TenantOwned, TenantSlot};

/// Product identifier (tenant-scoped via the product's `tenant_id` slot).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ProductId {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ProductError::InvalidId(e.to_string()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("product name must not be empty")]
    EmptyName,

    #[error("invalid product id: {0}")]
    InvalidId(String),
}

/// A catalog product owned by exactly one tenant.
///
/// The tenant is never set by application code: it is stamped when the
/// product is first committed and cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(default)]
    tenant_id: TenantSlot,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Result<Self, ProductError> {
        Self::with_id(ProductId::new(), name, created_at)
    }

    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProductError> {
        let name = validate_name(name.into())?;
        Ok(Self {
            id,
            name,
            tenant_id: TenantSlot::unassigned(),
            created_at,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }
}

fn validate_name(name: String) -> Result<String, ProductError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(trimmed.to_string())
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantOwned for Product {
    fn tenant_slot(&self) -> &TenantSlot {
        &self.tenant_id
    }

    fn tenant_slot_mut(&mut self, _: StampToken) -> &mut TenantSlot {
        &mut self.tenant_id
    }
}
