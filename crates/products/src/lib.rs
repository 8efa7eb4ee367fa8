//! Products domain module.
//!
//! `Product` is the example tenant-owned entity: plain data plus a
//! [`tenantscope_core::TenantSlot`], with tenant filtering and stamping left
//! entirely to the generic repository.

pub mod product;

pub use product::{Product, ProductError, ProductId};
