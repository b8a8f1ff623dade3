pub mod auth;
pub mod upload;
pub mod videos;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::database::DbPool;
use crate::services::media_store::MediaStore;
use crate::services::media_url::MediaUrls;
use crate::utils::jwt::JwtService;

pub struct AppState {
    pub db: DbPool,
    pub jwt_service: Arc<JwtService>,
    pub media_store: Arc<MediaStore>,
    pub media_urls: Arc<MediaUrls>,
    pub cookie_secure: bool,
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn routes(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth::routes(state.clone()))
        .nest("/videos", videos::routes(state.clone()))
        .nest("/upload", upload::routes(state, max_upload_bytes))
}
