#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use tubestream::api::AppState;
use tubestream::config::Config;
use tubestream::database::{DbPool, create_memory_pool};
use tubestream::server::{build_router, build_state};
use tubestream::services::admin_auth::ensure_admin;

pub const ADMIN_EMAIL: &str = "admin@tubestream.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub db: DbPool,
    pub public_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

pub fn test_config(public_dir: &TempDir, media_base_url: Option<&str>) -> Config {
    let public_dir = public_dir.path().to_string_lossy().to_string();
    let media_base_url = media_base_url.map(str::to_string);
    Config::from_lookup(move |key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "SECRET_KEY" => Some(SECRET.to_string()),
        "PUBLIC_DIR" => Some(public_dir.clone()),
        "MEDIA_BASE_URL" => media_base_url.clone(),
        _ => None,
    })
    .expect("test config should be valid")
}

pub async fn build_test_app() -> TestApp {
    build_test_app_with_base(None).await
}

/// Full router over an in-memory database with the admin seeded and a
/// temporary public directory.
pub async fn build_test_app_with_base(media_base_url: Option<&str>) -> TestApp {
    let db = create_memory_pool().await.expect("memory pool");
    ensure_admin(&db, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("admin seed");

    let public_dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&public_dir, media_base_url);
    let state = build_state(db.clone(), &config).expect("state");
    let router = build_router(state.clone(), config.max_upload_bytes);

    TestApp {
        router,
        state,
        db,
        public_dir,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_with_cookie(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(COOKIE, format!("admin-token={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body, None).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::delete(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

pub fn admin_token(app: &TestApp) -> String {
    app.state
        .jwt_service
        .generate_token(1)
        .expect("token generation")
}

pub const BOUNDARY: &str = "tubestream-test-boundary";

/// Builds a multipart body with one file part.
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn upload(app: Router, body: Vec<u8>, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::post("/api/upload").header(
        CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}
