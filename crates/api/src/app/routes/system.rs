use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::TenantContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The active tenant and its provider. The connection target is never exposed.
pub async fn tenant(Extension(tenant): Extension<TenantContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "tenantId": tenant.tenant_id().as_str(),
        "provider": tenant.binding().provider().as_str(),
    }))
}
