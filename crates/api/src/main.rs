use std::sync::Arc;

use anyhow::Context;

use tenantscope_core::MigrationTarget;
use tenantscope_infra::bootstrap::{apply_migrations, SchemaMigrator};
use tenantscope_infra::config;

const ADDR_ENV: &str = "TENANTSCOPE_ADDR";
const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const ADMIN_TOKEN_ENV: &str = "TENANTSCOPE_ADMIN_TOKEN";

/// Stands in for the external migration engine: records which stores would be migrated.
struct LoggingMigrator;

impl SchemaMigrator for LoggingMigrator {
    fn migrate(&self, target: &MigrationTarget) -> anyhow::Result<()> {
        tracing::info!(
            tenant_id = %target.tenant_id,
            provider = %target.provider,
            "schema migration requested"
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tenantscope_observability::init();

    let settings_path = config::settings_path_from_env();
    let directory = Arc::new(config::load_directory(&settings_path)?);

    let migrated = apply_migrations(&directory, LoggingMigrator)?;
    tracing::info!(stores = migrated, "schema bootstrap complete");

    let admin_token = std::env::var(ADMIN_TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
    if admin_token.is_none() {
        tracing::info!("{ADMIN_TOKEN_ENV} not set; admin routes disabled");
    }

    let app = tenantscope_api::app::build_app(directory, admin_token);

    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
