//! Settings loading (file + environment).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use tenantscope_core::{DefaultSettings, SettingsDocument, TenantDirectory, TenantSettings};

pub const SETTINGS_PATH_ENV: &str = "TENANTSCOPE_SETTINGS";
pub const DEFAULT_SETTINGS_PATH: &str = "tenantsettings.json";

/// Overrides `Defaults.ConnectionTarget`, so the secret can stay out of the file.
pub const DEFAULT_CONNECTION_ENV: &str = "TENANTSCOPE_DEFAULT_CONNECTION";
/// Overrides `Defaults.Provider`.
pub const DEFAULT_PROVIDER_ENV: &str = "TENANTSCOPE_DEFAULT_PROVIDER";

pub fn settings_path_from_env() -> PathBuf {
    env::var(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH))
}

/// Reads the `TenantSettings` section of a JSON settings file.
pub fn load_settings(path: &Path) -> Result<TenantSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("unable to read settings file {}", path.display()))?;
    let doc = SettingsDocument::from_json_str(&raw)
        .with_context(|| format!("unable to parse settings file {}", path.display()))?;
    Ok(doc.tenant_settings)
}

/// Applies environment overrides using `lookup` (normally `std::env::var`).
pub fn apply_env_overrides<F>(mut settings: TenantSettings, lookup: F) -> TenantSettings
where
    F: Fn(&str) -> Option<String>,
{
    let connection = lookup(DEFAULT_CONNECTION_ENV);
    let provider = lookup(DEFAULT_PROVIDER_ENV);
    if connection.is_none() && provider.is_none() {
        return settings;
    }

    let defaults = settings.defaults.get_or_insert_with(DefaultSettings::default);
    if let Some(connection) = connection {
        defaults.connection_target = Some(connection);
    }
    if let Some(provider) = provider {
        defaults.provider = Some(provider);
    }
    settings
}

/// Loads settings from `path`, applies environment overrides and builds the directory.
///
/// Any configuration error is fatal: the caller must not start serving.
pub fn load_directory(path: &Path) -> Result<TenantDirectory> {
    let settings = apply_env_overrides(load_settings(path)?, |key| env::var(key).ok());
    let directory = TenantDirectory::load(settings)
        .with_context(|| format!("invalid tenant configuration in {}", path.display()))?;
    info!(path = %path.display(), tenants = directory.len(), "tenant settings loaded");
    Ok(directory)
}
