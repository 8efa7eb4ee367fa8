//! Raw entity storage boundary.
//!
//! Stores are tenant-agnostic; tenant isolation is layered on top by the
//! repository and the unit of work.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryEntityStore;
pub use r#trait::{EntityStore, StoreError};
