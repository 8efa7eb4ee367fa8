use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use subtle::ConstantTimeEq;

use tenantscope_core::{TenancyError, TenantResolver};

use crate::app::errors::{json_error, tenancy_error_to_response};
use crate::context::{AdminContext, TenantContext};

/// Request header carrying the tenant identifier.
pub const TENANT_HEADER: &str = "tenant";

/// Resolves the `tenant` header and attaches the binding to the request.
///
/// A missing header is rejected with 401, an unknown (or non-UTF-8) one with
/// 403. Nothing downstream runs without a binding. Header bytes are decoded as
/// UTF-8, so configured ids outside ASCII resolve too.
pub async fn tenant_middleware(
    State(resolver): State<TenantResolver>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let binding = {
        let raw = tenant_header(req.headers()).map_err(|e| tenancy_error_to_response(&e))?;
        resolver.resolve(raw).map_err(|e| tenancy_error_to_response(&e))?
    };

    req.extensions_mut().insert(TenantContext::new(binding));

    Ok(next.run(req).await)
}

fn tenant_header(headers: &HeaderMap) -> Result<Option<&str>, TenancyError> {
    match headers.get(TENANT_HEADER) {
        None => Ok(None),
        Some(value) => std::str::from_utf8(value.as_bytes())
            .map(Some)
            .map_err(|_| TenancyError::unknown_tenant(String::from_utf8_lossy(value.as_bytes()))),
    }
}

#[derive(Clone)]
pub struct AdminState {
    /// `None` disables the admin routes.
    pub token: Option<Arc<str>>,
}

pub async fn admin_middleware(
    State(state): State<AdminState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(expected) = state.token.as_deref() else {
        return Err(json_error(StatusCode::NOT_FOUND, "not_found", "not found"));
    };

    let token = extract_bearer(req.headers())
        .map_err(|status| json_error(status, "unauthorized", "admin token required"))?;
    if !tokens_match(token, expected) {
        tracing::warn!("admin request with invalid token");
        return Err(json_error(StatusCode::UNAUTHORIZED, "unauthorized", "admin token required"));
    }

    req.extensions_mut().insert(AdminContext);

    Ok(next.run(req).await)
}

/// Compares in time independent of where the first differing byte is.
fn tokens_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn absent_header_is_none() {
        assert_eq!(tenant_header(&HeaderMap::new()), Ok(None));
    }

    #[test]
    fn empty_header_is_passed_through() {
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, HeaderValue::from_static(""));
        assert_eq!(tenant_header(&headers), Ok(Some("")));
    }

    #[test]
    fn utf8_header_outside_ascii_is_decoded() {
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, HeaderValue::from_bytes("açme".as_bytes()).unwrap());
        assert_eq!(tenant_header(&headers), Ok(Some("açme")));
    }

    #[test]
    fn non_utf8_header_is_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, HeaderValue::from_bytes(&[0xff, b'a']).unwrap());
        assert!(matches!(
            tenant_header(&headers),
            Err(TenancyError::UnknownTenant { .. })
        ));
    }

    #[test]
    fn bearer_is_required() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), Err(StatusCode::UNAUTHORIZED));

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer  s3cret "),
        );
        assert_eq!(extract_bearer(&headers), Ok("s3cret"));
    }

    #[test]
    fn admin_token_must_match_exactly() {
        assert!(tokens_match("s3cret", "s3cret"));
        assert!(!tokens_match("s3cret", "s3creT"));
        assert!(!tokens_match("s3cre", "s3cret"));
        assert!(!tokens_match("", "s3cret"));
    }
}
