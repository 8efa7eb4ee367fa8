//! Per-unit-of-work tenant resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::directory::{TenantDirectory, TenantRecord};
use crate::error::{TenancyError, TenancyResult};
use crate::id::TenantId;
use crate::provider::ProviderKind;

/// The resolved tenant for one unit of work.
///
/// Created at the start of the unit of work and dropped at its end. It is
/// passed explicitly to everything that needs tenant context; there is no
/// ambient "current tenant". Each unit of work resolves its own binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTenantBinding {
    record: TenantRecord,
}

impl ActiveTenantBinding {
    pub fn tenant_id(&self) -> &TenantId {
        &self.record.id
    }

    /// The normalized record (connection target already filled with the default if needed).
    pub fn record(&self) -> &TenantRecord {
        &self.record
    }

    pub fn connection_target(&self) -> &str {
        &self.record.connection_target
    }

    pub fn provider(&self) -> ProviderKind {
        self.record.provider
    }
}

/// Resolves a raw tenant identifier against the directory.
///
/// `None` means the identifier was not supplied at all. An empty string is a
/// supplied identifier that matches nothing.
pub fn resolve(raw_id: Option<&str>, directory: &TenantDirectory) -> TenancyResult<ActiveTenantBinding> {
    let Some(raw_id) = raw_id else {
        warn!("unit of work rejected: no tenant identifier");
        return Err(TenancyError::MissingTenant);
    };

    let Some(record) = directory.find(raw_id) else {
        warn!(tenant_id = raw_id, "unit of work rejected: unknown tenant");
        return Err(TenancyError::unknown_tenant(raw_id));
    };

    let record = directory.normalize(record);
    debug!(
        tenant_id = %record.id,
        provider = %record.provider,
        "tenant resolved"
    );

    Ok(ActiveTenantBinding { record })
}

/// Shared handle over a loaded directory.
///
/// Cloning is cheap. To pick up new configuration, build a new resolver over a
/// new directory and replace the old one as a whole.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    directory: Arc<TenantDirectory>,
}

impl TenantResolver {
    pub fn new(directory: Arc<TenantDirectory>) -> Self {
        Self { directory }
    }

    pub fn resolve(&self, raw_id: Option<&str>) -> TenancyResult<ActiveTenantBinding> {
        resolve(raw_id, &self.directory)
    }

    pub fn directory(&self) -> &Arc<TenantDirectory> {
        &self.directory
    }
}
