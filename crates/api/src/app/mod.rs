//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: tenant resolver and per-target product stores
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use tenantscope_core::TenantDirectory;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// `admin_token` enables the cross-tenant `/admin` routes.
pub fn build_app(directory: Arc<TenantDirectory>, admin_token: Option<String>) -> Router {
    let services = Arc::new(services::AppServices::new(directory));

    // Tenant-scoped routes: require a resolvable `tenant` header.
    let scoped = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            services.resolver().clone(),
            middleware::tenant_middleware,
        ));

    let admin_state = middleware::AdminState {
        token: admin_token.map(Arc::from),
    };
    let admin = routes::admin::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            admin_state,
            middleware::admin_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/admin", admin)
        .merge(scoped)
        .layer(ServiceBuilder::new())
}
