//! Startup schema bootstrap.
//!
//! The migration engine itself is external; this module only decides which
//! stores to hand it. Tenants that share a connection target (usually the
//! default one) are migrated once.

use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::info;

use tenantscope_core::{MigrationTarget, ProviderKind, TenantDirectory};

/// External schema migration engine.
pub trait SchemaMigrator {
    fn migrate(&self, target: &MigrationTarget) -> Result<()>;
}

impl<M: SchemaMigrator + ?Sized> SchemaMigrator for &M {
    fn migrate(&self, target: &MigrationTarget) -> Result<()> {
        (**self).migrate(target)
    }
}

/// Migrates every distinct `(provider, connection target)` of the directory,
/// in configuration order. Stops at the first failure; the process must not
/// start serving after an error.
///
/// Returns the number of stores migrated.
pub fn apply_migrations<M: SchemaMigrator>(directory: &TenantDirectory, migrator: M) -> Result<usize> {
    let mut seen: HashSet<(ProviderKind, String)> = HashSet::new();
    let mut migrated = 0;

    for target in directory.migration_targets() {
        if !seen.insert((target.provider, target.connection_target.clone())) {
            continue;
        }

        migrator
            .migrate(&target)
            .with_context(|| format!("schema migration failed for tenant {}", target.tenant_id))?;
        info!(tenant_id = %target.tenant_id, provider = %target.provider, "schema migrated");
        migrated += 1;
    }

    Ok(migrated)
}
