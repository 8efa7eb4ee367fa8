use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use tenantscope_infra::TenantRepository;
use tenantscope_products::{Product, ProductId};

use crate::app::services::{AppServices, ProductStore};
use crate::app::{dto, errors};
use crate::context::TenantContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
}

fn repository<'b>(
    services: &AppServices,
    tenant: &'b TenantContext,
) -> Result<TenantRepository<'b, Product, ProductStore>, axum::response::Response> {
    let store = services
        .product_store(tenant.binding())
        .map_err(errors::open_error_to_response)?;
    Ok(TenantRepository::new(store, tenant.binding()))
}

fn parse_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse().map_err(errors::product_error_to_response)
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> axum::response::Response {
    let repo = match repository(&services, &tenant) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match repo.list() {
        Ok(products) => Json(dto::products_response(&products)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let repo = match repository(&services, &tenant) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match repo.get(&id) {
        Ok(Some(product)) => Json(dto::ProductResponse::from(&product)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let product = match Product::new(body.name, Utc::now()) {
        Ok(p) => p,
        Err(e) => return errors::product_error_to_response(e),
    };
    let product = match dto::with_claimed_tenant(product, body.tenant_id.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let repo = match repository(&services, &tenant) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let mut uow = repo.begin();
    uow.add(product);
    match uow.commit() {
        Ok(mut committed) if !committed.is_empty() => {
            (StatusCode::CREATED, Json(dto::ProductResponse::from(&committed.remove(0)))).into_response()
        }
        Ok(_) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            "nothing committed",
        ),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let repo = match repository(&services, &tenant) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let stored = match repo.get(&id) {
        Ok(Some(p)) => p,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        Err(e) => return errors::repository_error_to_response(e),
    };

    let mut incoming = match dto::with_claimed_tenant(stored, body.tenant_id.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    if let Err(e) = incoming.rename(body.name) {
        return errors::product_error_to_response(e);
    }

    match repo.update(incoming) {
        Ok(product) => Json(dto::ProductResponse::from(&product)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let repo = match repository(&services, &tenant) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match repo.delete(&id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}
