//! `tenantscope-core` — tenant resolution and scoping policy.
//!
//! This crate contains **pure policy** (no infrastructure concerns): the
//! tenant directory, per-unit-of-work resolution, the read-filter/write-stamp
//! scoping rules and provider selection.

pub mod directory;
pub mod entity;
pub mod error;
pub mod id;
pub mod provider;
pub mod resolver;
pub mod scoping;
pub mod settings;

pub use directory::{DefaultConfig, MigrationTarget, TenantDirectory, TenantRecord};
pub use entity::{Entity, StampToken, TenantOwned, TenantSlot};
pub use error::{TenancyError, TenancyResult};
pub use id::TenantId;
pub use provider::{select_provider, ProviderChoice, ProviderKind};
pub use resolver::{resolve, ActiveTenantBinding, TenantResolver};
pub use scoping::{ScopingPolicy, TenantPredicate};
pub use settings::{DefaultSettings, SettingsDocument, TenantEntry, TenantSettings};
