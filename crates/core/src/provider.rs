//! Backing-store provider tags and connection selection.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::directory::DefaultConfig;
use crate::error::{TenancyError, TenancyResult};
use crate::resolver::ActiveTenantBinding;

/// Closed set of backing store kinds.
///
/// Supporting another store means adding a variant here and a match arm
/// wherever a provider is turned into a connection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Mssql,
    Postgres,
}

impl ProviderKind {
    /// Tag used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mssql => "MSSQL",
            ProviderKind::Postgres => "Postgres",
        }
    }
}

impl core::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = TenancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MSSQL" => Ok(ProviderKind::Mssql),
            "Postgres" => Ok(ProviderKind::Postgres),
            other => Err(TenancyError::configuration(format!(
                "unsupported provider '{other}'"
            ))),
        }
    }
}

impl Serialize for ProviderKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// What a persistence layer needs to open a connection for one unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderChoice {
    pub provider: ProviderKind,
    pub connection_target: String,
}

/// Selects the provider and connection target for a unit of work.
///
/// With a bound tenant this is the tenant's effective configuration. Without
/// one (startup tooling, health probes) it is the configured default, which
/// must be non-empty.
pub fn select_provider(
    binding: Option<&ActiveTenantBinding>,
    defaults: &DefaultConfig,
) -> TenancyResult<ProviderChoice> {
    if let Some(binding) = binding {
        return Ok(ProviderChoice {
            provider: binding.provider(),
            connection_target: binding.connection_target().to_string(),
        });
    }

    if defaults.connection_target.trim().is_empty() {
        return Err(TenancyError::configuration(
            "no tenant resolved and no default connection target configured",
        ));
    }

    Ok(ProviderChoice {
        provider: defaults.provider,
        connection_target: defaults.connection_target.clone(),
    })
}
