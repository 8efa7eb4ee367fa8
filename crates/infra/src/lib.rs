//! Persistence glue: stores, the tenant-scoped repository, settings loading,
//! connection hand-off and the migration bootstrap.

pub mod admin;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod repository;
pub mod store;
pub mod unit_of_work;

pub use admin::CrossTenantReader;
pub use repository::{RepositoryError, RepositoryResult, TenantRepository};
pub use store::{EntityStore, InMemoryEntityStore, StoreError};
pub use unit_of_work::UnitOfWork;

#[cfg(test)]
mod test_support;
