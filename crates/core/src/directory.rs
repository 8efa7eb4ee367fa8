//! Tenant directory: the read-only, in-memory map of configured tenants.
//!
//! Built once at process start from [`TenantSettings`] and never mutated
//! afterwards. Share it behind an `Arc`; reloading means building a new
//! directory and swapping the reference, never editing this one in place.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::error::{TenancyError, TenancyResult};
use crate::id::TenantId;
use crate::provider::{ProviderChoice, ProviderKind};
use crate::settings::TenantSettings;

/// One configured tenant.
///
/// An empty `connection_target` means "use the default target"; see
/// [`TenantDirectory::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantRecord {
    pub id: TenantId,
    pub connection_target: String,
    pub provider: ProviderKind,
}

impl TenantRecord {
    pub fn new(id: impl Into<TenantId>, connection_target: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            id: id.into(),
            connection_target: connection_target.into(),
            provider,
        }
    }

    pub fn uses_default_target(&self) -> bool {
        self.connection_target.is_empty()
    }
}

/// Default connection target and provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultConfig {
    pub connection_target: String,
    pub provider: ProviderKind,
}

/// Per-tenant information handed to the external migration bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationTarget {
    pub tenant_id: TenantId,
    pub provider: ProviderKind,
    pub connection_target: String,
}

impl MigrationTarget {
    /// The store this target addresses.
    pub fn choice(&self) -> ProviderChoice {
        ProviderChoice {
            provider: self.provider,
            connection_target: self.connection_target.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TenantDirectory {
    records: Vec<TenantRecord>,
    index: HashMap<TenantId, usize>,
    defaults: DefaultConfig,
}

impl TenantDirectory {
    /// Builds the directory from static configuration.
    ///
    /// Rejects a missing or blank default connection target, a missing default
    /// provider, unknown provider tags, empty tenant ids and duplicate tenant ids.
    pub fn load(settings: TenantSettings) -> TenancyResult<Self> {
        let defaults = settings
            .defaults
            .ok_or_else(|| TenancyError::configuration("TenantSettings.Defaults is missing"))?;

        let connection_target = defaults.connection_target.unwrap_or_default();
        if connection_target.trim().is_empty() {
            return Err(TenancyError::configuration(
                "TenantSettings.Defaults.ConnectionTarget must not be empty",
            ));
        }

        let provider: ProviderKind = defaults
            .provider
            .as_deref()
            .ok_or_else(|| TenancyError::configuration("TenantSettings.Defaults.Provider is missing"))?
            .parse()?;

        let defaults = DefaultConfig {
            connection_target,
            provider,
        };

        let mut records = Vec::with_capacity(settings.tenants.len());
        let mut index = HashMap::with_capacity(settings.tenants.len());

        for (position, entry) in settings.tenants.into_iter().enumerate() {
            let id: TenantId = entry.id.parse().map_err(|_| {
                TenancyError::configuration(format!("tenant entry {position} has an empty Id"))
            })?;

            if index.contains_key(&id) {
                return Err(TenancyError::configuration(format!(
                    "duplicate tenant id '{id}'"
                )));
            }

            let provider = match entry.provider.as_deref() {
                Some(tag) => tag.parse()?,
                None => defaults.provider,
            };

            index.insert(id.clone(), records.len());
            records.push(TenantRecord {
                id,
                connection_target: entry.connection_target.unwrap_or_default(),
                provider,
            });
        }

        info!(
            tenants = records.len(),
            default_provider = %defaults.provider,
            "tenant directory loaded"
        );

        Ok(Self {
            records,
            index,
            defaults,
        })
    }

    /// Exact, case-sensitive lookup.
    pub fn find(&self, id: &str) -> Option<&TenantRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Returns a copy of `record` with an empty connection target replaced by the default.
    pub fn normalize(&self, record: &TenantRecord) -> TenantRecord {
        let mut normalized = record.clone();
        if normalized.uses_default_target() {
            normalized.connection_target = self.defaults.connection_target.clone();
        }
        normalized
    }

    pub fn defaults(&self) -> &DefaultConfig {
        &self.defaults
    }

    /// Configured tenants, in configuration order.
    pub fn tenants(&self) -> impl Iterator<Item = &TenantRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalized connection information for every configured tenant.
    pub fn migration_targets(&self) -> Vec<MigrationTarget> {
        self.records
            .iter()
            .map(|record| {
                let normalized = self.normalize(record);
                MigrationTarget {
                    tenant_id: normalized.id,
                    provider: normalized.provider,
                    connection_target: normalized.connection_target,
                }
            })
            .collect()
    }
}
