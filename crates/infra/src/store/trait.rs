use std::sync::Arc;

use thiserror::Error;

use tenantscope_core::Entity;

/// Storage-level failure.
///
/// These are infrastructure errors; tenant isolation failures are reported by
/// the repository as `TenancyError`s.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("entity {0} already exists")]
    Duplicate(String),

    #[error("entity {0} not found")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Raw entity storage, keyed by entity id.
///
/// A store knows nothing about tenants. Application code reaches it only
/// through [`crate::repository::TenantRepository`] (scoped reads, checked
/// updates), [`crate::unit_of_work::UnitOfWork`] (stamped inserts) or the
/// explicitly named [`crate::admin::CrossTenantReader`].
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Insert a batch atomically: either every entity is stored or none is.
    fn insert_batch(&self, entities: Vec<E>) -> Result<(), StoreError>;

    fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError>;

    /// Replace an existing entity.
    fn replace(&self, entity: E) -> Result<(), StoreError>;

    fn remove(&self, id: &E::Id) -> Result<Option<E>, StoreError>;

    /// All entities accepted by `keep`, in insertion order.
    fn scan(&self, keep: &dyn Fn(&E) -> bool) -> Result<Vec<E>, StoreError>;
}

impl<E, S> EntityStore<E> for Arc<S>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    fn insert_batch(&self, entities: Vec<E>) -> Result<(), StoreError> {
        (**self).insert_batch(entities)
    }

    fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        (**self).get(id)
    }

    fn replace(&self, entity: E) -> Result<(), StoreError> {
        (**self).replace(entity)
    }

    fn remove(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        (**self).remove(id)
    }

    fn scan(&self, keep: &dyn Fn(&E) -> bool) -> Result<Vec<E>, StoreError> {
        (**self).scan(keep)
    }
}
