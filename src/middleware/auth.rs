use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::api::AppState;
use crate::utils::error::AppError;

pub const ADMIN_TOKEN_COOKIE: &str = "admin-token";
pub const AUTH_ADMIN_HEADER: &str = "x-admin-id";
pub const LOGIN_PAGE: &str = "/admin/login";

/// Bearer header first, then the `admin-token` cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match bearer {
        Some(token) => Some(token.to_string()),
        None => CookieJar::from_headers(headers)
            .get(ADMIN_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty()),
    }
}

fn authorize(state: &AppState, request: &mut Request) -> Result<(), AppError> {
    let token = token_from_headers(request.headers())
        .ok_or_else(|| AppError::Auth("Authentication required".to_string()))?;

    let admin_id = state
        .jwt_service
        .extract_admin_id(&token)
        .map_err(|_| AppError::Auth("Invalid token".to_string()))?;

    request.headers_mut().insert(
        AUTH_ADMIN_HEADER,
        admin_id
            .to_string()
            .parse()
            .map_err(|_| AppError::Internal("Failed to set admin header".to_string()))?,
    );

    Ok(())
}

fn is_read_only(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
}

/// API guard: reads pass, everything else needs a valid admin token.
pub async fn require_admin_for_writes(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_read_only(request.method()) {
        request.headers_mut().remove(AUTH_ADMIN_HEADER);
        return Ok(next.run(request).await);
    }

    authorize(&state, &mut request)?;
    Ok(next.run(request).await)
}

/// API guard for endpoints where every method is privileged.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &mut request)?;
    Ok(next.run(request).await)
}

/// Page guard: anything short of a valid token bounces to the login page.
pub async fn require_admin_page(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match authorize(&state, &mut request) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::debug!("Admin page redirect: {}", e);
            Redirect::temporary(LOGIN_PAGE).into_response()
        }
    }
}

pub fn extract_admin_id(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(AUTH_ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}
