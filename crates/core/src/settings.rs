//! Static tenant configuration, as read from the settings document.
//!
//! Keys are PascalCase. The historical key names (`ConnectionString`,
//! `DBProvider`, `TId`) are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::error::TenancyError;

/// Top-level settings document; only the `TenantSettings` section is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(rename = "TenantSettings", alias = "TenantSittings")]
    pub tenant_settings: TenantSettings,
}

impl SettingsDocument {
    pub fn from_json_str(raw: &str) -> Result<Self, TenancyError> {
        serde_json::from_str(raw)
            .map_err(|e| TenancyError::configuration(format!("invalid settings document: {e}")))
    }
}

/// Defaults plus the configured tenant list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TenantSettings {
    #[serde(default)]
    pub defaults: Option<DefaultSettings>,
    #[serde(default)]
    pub tenants: Vec<TenantEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefaultSettings {
    #[serde(default, alias = "ConnectionString")]
    pub connection_target: Option<String>,
    #[serde(default, alias = "DBProvider")]
    pub provider: Option<String>,
}

/// One configured tenant. Missing `ConnectionTarget`/`Provider` fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TenantEntry {
    #[serde(alias = "TId")]
    pub id: String,
    #[serde(default, alias = "ConnectionString")]
    pub connection_target: Option<String>,
    #[serde(default, alias = "DBProvider")]
    pub provider: Option<String>,
}

impl TenantEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_connection_target(mut self, target: impl Into<String>) -> Self {
        self.connection_target = Some(target.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}
