//! Tenancy error model.

use thiserror::Error;

use crate::id::TenantId;

/// Result type used across the tenancy layer.
pub type TenancyResult<T> = Result<T, TenancyError>;

/// Tenancy-level error.
///
/// Every variant is an immediate, local failure. Nothing here is retried and
/// nothing degrades to a default tenant: when the active tenant is in doubt the
/// unit of work is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TenancyError {
    /// The unit of work touches tenant-owned data but carries no tenant identifier.
    #[error("no tenant identifier provided for this unit of work")]
    MissingTenant,

    /// The supplied identifier does not match any configured tenant.
    #[error("identifier '{tenant_id}' does not match any configured tenant")]
    UnknownTenant { tenant_id: String },

    /// Static configuration is missing required values or is inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An entity owned by another tenant was addressed through a scoped path.
    #[error("entity is not owned by tenant '{tenant_id}'")]
    CrossTenantAccess { tenant_id: TenantId },

    /// An update attempted to move an entity to a different tenant.
    #[error("tenant id of an existing entity cannot change (stored '{stored}', attempted '{attempted}')")]
    TenantReassignment { stored: String, attempted: String },
}

impl TenancyError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn unknown_tenant(tenant_id: impl Into<String>) -> Self {
        Self::UnknownTenant {
            tenant_id: tenant_id.into(),
        }
    }
}
