//! Cross-tenant administrative reads.
//!
//! This is the only way to read tenant-owned entities without an active
//! binding. It is deliberately separate from [`crate::repository`] and every
//! call is logged with the caller-supplied reason.

use std::marker::PhantomData;

use tracing::info;

use tenantscope_core::{TenantId, TenantOwned};

use crate::repository::RepositoryResult;
use crate::store::EntityStore;

pub struct CrossTenantReader<E, S> {
    store: S,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> CrossTenantReader<E, S>
where
    E: TenantOwned,
    S: EntityStore<E>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Every entity of every tenant.
    pub fn list_all(&self, reason: &str) -> RepositoryResult<Vec<E>> {
        let rows = self.store.scan(&|_: &E| true)?;
        info!(reason, rows = rows.len(), "cross-tenant read: all tenants");
        Ok(rows)
    }

    /// Entities of one named tenant, without resolving a binding for it.
    pub fn list_for(&self, tenant_id: &TenantId, reason: &str) -> RepositoryResult<Vec<E>> {
        let rows = self
            .store
            .scan(&|e: &E| e.tenant_id() == Some(tenant_id))?;
        info!(reason, %tenant_id, rows = rows.len(), "cross-tenant read: single tenant");
        Ok(rows)
    }
}
