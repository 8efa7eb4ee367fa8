use axum::{routing::get, Router};

pub mod admin;
pub mod products;
pub mod system;

/// Router for all tenant-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/tenant", get(system::tenant))
        .nest("/products", products::router())
}
