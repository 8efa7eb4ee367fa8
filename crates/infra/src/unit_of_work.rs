//! Explicit unit-of-work collector for newly created tenant-owned entities.
//!
//! Every create goes through [`UnitOfWork::add`]. On [`UnitOfWork::commit`]
//! each pending entity is stamped with the bound tenant and the batch is
//! written atomically. Dropping an uncommitted unit of work discards its
//! pending entities.

use tracing::{debug, info, info_span};
use uuid::Uuid;

use tenantscope_core::{ActiveTenantBinding, ScopingPolicy, TenantOwned};

use crate::repository::RepositoryResult;
use crate::store::EntityStore;

pub struct UnitOfWork<'b, E, S>
where
    E: TenantOwned,
    S: EntityStore<E>,
{
    id: Uuid,
    store: S,
    binding: &'b ActiveTenantBinding,
    pending: Vec<E>,
}

impl<'b, E, S> UnitOfWork<'b, E, S>
where
    E: TenantOwned,
    S: EntityStore<E>,
{
    pub fn begin(store: S, binding: &'b ActiveTenantBinding) -> Self {
        Self {
            id: Uuid::now_v7(),
            store,
            binding,
            pending: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Registers a new entity. Its tenant slot is ignored until commit stamps it.
    pub fn add(&mut self, entity: E) -> &mut Self {
        self.pending.push(entity);
        self
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Stamps and persists every pending entity, returning them as stored.
    pub fn commit(mut self) -> RepositoryResult<Vec<E>>
    where
        E: Clone,
    {
        let span = info_span!("unit_of_work.commit", uow_id = %self.id, tenant_id = %self.binding.tenant_id());
        let _guard = span.enter();

        let mut batch = std::mem::take(&mut self.pending);
        for entity in &mut batch {
            ScopingPolicy::stamp_on_insert(entity, self.binding);
        }

        let count = batch.len();
        self.store.insert_batch(batch.clone())?;
        info!(entities = count, "unit of work committed");
        Ok(batch)
    }

    /// Discards pending entities without touching the store.
    pub fn rollback(mut self) {
        let discarded = std::mem::take(&mut self.pending).len();
        debug!(uow_id = %self.id, discarded, "unit of work rolled back");
    }
}

impl<E, S> Drop for UnitOfWork<'_, E, S>
where
    E: TenantOwned,
    S: EntityStore<E>,
{
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            debug!(
                uow_id = %self.id,
                discarded = self.pending.len(),
                "unit of work dropped without commit"
            );
        }
    }
}
