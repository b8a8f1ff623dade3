use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::AppState;
use crate::config::Config;
use crate::database::DbPool;
use crate::services::media_store::{MediaKind, MediaStore};
use crate::services::media_url::MediaUrls;
use crate::utils::error::AppResult;
use crate::utils::jwt::JwtService;

/// Wires the injected pool and validated config into shared state.
pub fn build_state(db: DbPool, config: &Config) -> AppResult<Arc<AppState>> {
    let jwt_service = JwtService::new(&config.secret_key)
        .with_ttl(chrono::Duration::seconds(config.token_ttl_secs));
    let media_urls = MediaUrls::new(config.media_base_url.as_deref())?;

    Ok(Arc::new(AppState {
        db,
        jwt_service: Arc::new(jwt_service),
        media_store: Arc::new(MediaStore::new(config.public_dir.clone())),
        media_urls: Arc::new(media_urls),
        cookie_secure: config.cookie_secure,
    }))
}

pub fn build_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let thumbnails = ServeDir::new(state.media_store.folder_path(MediaKind::Thumbnail));
    let videos = ServeDir::new(state.media_store.folder_path(MediaKind::Video));

    Router::new()
        .nest("/api", crate::api::routes(state.clone(), max_upload_bytes))
        .nest_service("/thumbnails", thumbnails)
        .nest_service("/videos", videos)
        .merge(crate::web::routes(state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
