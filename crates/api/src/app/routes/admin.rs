//! Cross-tenant administrative reads.
//!
//! Mounted only behind the admin bearer token; never reachable with a
//! `tenant` header alone.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use tenantscope_core::TenantId;
use tenantscope_infra::CrossTenantReader;

use crate::app::{errors, services::AppServices};

#[derive(Debug, Deserialize)]
pub struct AdminProductsQuery {
    pub tenant: Option<String>,
    pub reason: Option<String>,
}

pub fn router() -> Router {
    Router::new().route("/products", get(list_products))
}

/// GET /admin/products[?tenant=..][&reason=..]
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<AdminProductsQuery>,
) -> axum::response::Response {
    let reason = query.reason.as_deref().unwrap_or("admin api");
    let stores = match services.all_product_stores() {
        Ok(s) => s,
        Err(e) => return errors::open_error_to_response(e),
    };

    let mut rows = Vec::new();
    for store in stores {
        let reader = CrossTenantReader::new(store);
        let result = match query.tenant.as_deref() {
            Some(tenant) => reader.list_for(&TenantId::from(tenant), reason),
            None => reader.list_all(reason),
        };
        match result {
            Ok(mut found) => rows.append(&mut found),
            Err(e) => return errors::repository_error_to_response(e),
        }
    }

    Json(rows).into_response()
}
