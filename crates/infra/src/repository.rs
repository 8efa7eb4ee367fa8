//! Tenant-scoped repository: the standard access path for tenant-owned entities.
//!
//! A repository can only be built from an [`ActiveTenantBinding`], and every
//! read it exposes goes through that binding's predicate. There is no method
//! that skips the filter; cross-tenant reads live in [`crate::admin`].

use std::marker::PhantomData;

use thiserror::Error;
use tracing::{debug, warn};

use tenantscope_core::{ActiveTenantBinding, ScopingPolicy, TenancyError, TenantOwned, TenantPredicate};

use crate::store::{EntityStore, StoreError};
use crate::unit_of_work::UnitOfWork;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error(transparent)]
    Tenancy(#[from] TenancyError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("not found")]
    NotFound,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub struct TenantRepository<'b, E, S> {
    store: S,
    binding: &'b ActiveTenantBinding,
    predicate: TenantPredicate,
    _entity: PhantomData<fn() -> E>,
}

impl<'b, E, S> TenantRepository<'b, E, S>
where
    E: TenantOwned,
    S: EntityStore<E>,
{
    pub fn new(store: S, binding: &'b ActiveTenantBinding) -> Self {
        Self {
            store,
            binding,
            predicate: ScopingPolicy::filter_predicate(binding),
            _entity: PhantomData,
        }
    }

    /// Every entity owned by the bound tenant.
    pub fn list(&self) -> RepositoryResult<Vec<E>> {
        let predicate = &self.predicate;
        Ok(self.store.scan(&|e: &E| predicate.matches(e))?)
    }

    /// Entities owned by the bound tenant that also satisfy `filter`.
    pub fn find_by<F>(&self, filter: F) -> RepositoryResult<Vec<E>>
    where
        F: Fn(&E) -> bool,
    {
        let predicate = &self.predicate;
        Ok(self.store.scan(&|e: &E| predicate.matches(e) && filter(e))?)
    }

    /// Looks up one entity; rows of other tenants are reported as absent.
    pub fn get(&self, id: &E::Id) -> RepositoryResult<Option<E>> {
        Ok(self.store.get(id)?.filter(|e| self.predicate.matches(e)))
    }

    /// Replaces an entity the bound tenant already owns.
    ///
    /// The tenant id is immutable after creation: an incoming entity whose
    /// slot differs from the stored one is rejected.
    pub fn update(&self, entity: E) -> RepositoryResult<E>
    where
        E: Clone,
    {
        let stored = self.load_owned(entity.id())?;
        ScopingPolicy::verify_unchanged(&stored, &entity).inspect_err(|e| {
            warn!(tenant_id = %self.binding.tenant_id(), error = %e, "tenant reassignment refused");
        })?;

        self.store.replace(entity.clone())?;
        debug!(tenant_id = %self.binding.tenant_id(), id = ?entity.id(), "entity updated");
        Ok(entity)
    }

    pub fn delete(&self, id: &E::Id) -> RepositoryResult<E> {
        self.load_owned(id)?;
        let removed = self.store.remove(id)?.ok_or(RepositoryError::NotFound)?;
        debug!(tenant_id = %self.binding.tenant_id(), id = ?id, "entity deleted");
        Ok(removed)
    }

    fn load_owned(&self, id: &E::Id) -> RepositoryResult<E> {
        let stored = self.store.get(id)?.ok_or(RepositoryError::NotFound)?;
        ScopingPolicy::ensure_owned(&stored, self.binding).inspect_err(|_| {
            warn!(tenant_id = %self.binding.tenant_id(), id = ?id, "cross-tenant write refused");
        })?;
        Ok(stored)
    }
}

impl<'b, E, S> TenantRepository<'b, E, S>
where
    E: TenantOwned,
    S: EntityStore<E> + Clone,
{
    /// Starts a unit of work that inserts through this repository's store and binding.
    pub fn begin(&self) -> UnitOfWork<'b, E, S> {
        UnitOfWork::begin(self.store.clone(), self.binding)
    }
}
