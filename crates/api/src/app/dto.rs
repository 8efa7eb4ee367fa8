use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tenantscope_products::{Product, ProductId};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// `tenantId` is accepted but never trusted: inserts are stamped with the
/// tenant of the request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub tenant_id: Option<String>,
}

/// A `tenantId` that differs from the stored one is refused.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    pub tenant_id: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Product as returned to tenant clients. The owning tenant is implied by the
/// request and never echoed back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id_typed(),
            name: product.name().to_string(),
            created_at: product.created_at(),
        }
    }
}

pub fn products_response(products: &[Product]) -> Vec<ProductResponse> {
    products.iter().map(ProductResponse::from).collect()
}

// -------------------------
// Mapping helpers
// -------------------------

/// Applies a client-claimed tenant id to a product representation.
///
/// The claim travels with the entity so that the scoping policy (stamp on
/// insert, immutability check on update) decides what happens to it.
pub fn with_claimed_tenant(
    product: Product,
    claimed: Option<&str>,
) -> Result<Product, axum::response::Response> {
    let Some(claimed) = claimed else {
        return Ok(product);
    };

    let mut doc = serde_json::to_value(&product).map_err(internal)?;
    doc["tenantId"] = serde_json::Value::String(claimed.to_string());
    serde_json::from_value(doc).map_err(internal)
}

fn internal(e: serde_json::Error) -> axum::response::Response {
    errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "serialization_error", e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tenantscope_core::TenantOwned;

    #[test]
    fn claim_is_carried_on_the_representation() {
        let product = Product::new("Widget", Utc::now()).unwrap();
        let claimed = with_claimed_tenant(product.clone(), Some("T2")).unwrap();

        assert_eq!(claimed.tenant_id().map(|t| t.as_str()), Some("T2"));
        assert_eq!(claimed.id_typed(), product.id_typed());
        assert_eq!(claimed.name(), "Widget");
    }

    #[test]
    fn response_omits_tenant() {
        let mut product = Product::new("Widget", Utc::now()).unwrap();
        product = with_claimed_tenant(product, Some("T1")).unwrap();

        let body = serde_json::to_value(ProductResponse::from(&product)).unwrap();
        assert!(body.get("tenantId").is_none());
        assert_eq!(body["name"], "Widget");
        assert_eq!(body["id"], product.id_typed().to_string());
        assert!(body.get("createdAt").is_some());
    }

    #[test]
    fn no_claim_leaves_product_untouched() {
        let product = Product::new("Widget", Utc::now()).unwrap();
        assert_eq!(with_claimed_tenant(product.clone(), None).unwrap(), product);
    }
}
