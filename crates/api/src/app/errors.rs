use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tenantscope_core::TenancyError;
use tenantscope_infra::db::OpenError;
use tenantscope_infra::{RepositoryError, StoreError};
use tenantscope_products::ProductError;

pub fn tenancy_error_to_response(err: &TenancyError) -> axum::response::Response {
    match err {
        TenancyError::MissingTenant => {
            json_error(StatusCode::UNAUTHORIZED, "missing_tenant", err.to_string())
        }
        TenancyError::UnknownTenant { .. } => {
            json_error(StatusCode::FORBIDDEN, "unknown_tenant", err.to_string())
        }
        // Another tenant's row is reported exactly like a missing one.
        TenancyError::CrossTenantAccess { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", "not found")
        }
        TenancyError::TenantReassignment { .. } => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "tenant_reassignment",
            err.to_string(),
        ),
        TenancyError::Configuration(_) => {
            tracing::error!(error = %err, "configuration error while serving request");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                "configuration error",
            )
        }
    }
}

pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    match err {
        RepositoryError::Tenancy(e) => tenancy_error_to_response(&e),
        RepositoryError::NotFound | RepositoryError::Store(StoreError::NotFound(_)) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "not found")
        }
        RepositoryError::Store(e @ StoreError::Duplicate(_)) => {
            json_error(StatusCode::CONFLICT, "conflict", e.to_string())
        }
        RepositoryError::Store(e @ StoreError::Unavailable(_)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", e.to_string())
        }
    }
}

pub fn open_error_to_response(err: OpenError) -> axum::response::Response {
    match err {
        OpenError::Tenancy(e) => tenancy_error_to_response(&e),
        e => {
            tracing::error!(error = %e, "unable to open tenant store");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", e.to_string())
        }
    }
}

pub fn product_error_to_response(err: ProductError) -> axum::response::Response {
    match err {
        ProductError::EmptyName => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        ProductError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
