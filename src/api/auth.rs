use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::AppState;
use crate::middleware::auth::ADMIN_TOKEN_COOKIE;
use crate::models::admin::AdminLoginRequest;
use crate::services::admin_auth::authenticate;
use crate::utils::error::{AppError, AppResult};

fn session_cookie(token: String, secure: bool, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((ADMIN_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> AppResult<(CookieJar, Json<Value>)> {
    let Json(payload) = payload?;
    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }
    };

    let token = authenticate(&state.db, &state.jwt_service, &email, &password).await?;
    let cookie = session_cookie(
        token,
        state.cookie_secure,
        state.jwt_service.ttl().num_seconds(),
    );

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let cookie = session_cookie(String::new(), state.cookie_secure, 0);
    tracing::debug!("Admin session cookie cleared");
    (jar.add(cookie), Json(json!({ "success": true })))
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin", post(login))
        .route("/logout", post(logout))
        .with_state(state)
}
