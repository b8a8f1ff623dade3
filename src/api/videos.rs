use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode},
    routing::get,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::middleware::auth::{extract_admin_id, require_admin_for_writes};
use crate::models::video::{CreateVideoRequest, UpdateVideoRequest, Video};
use crate::services::video::{create_video, delete_video, get_video, list_videos, update_video};
use crate::utils::error::AppResult;

async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Video>>> {
    let videos = list_videos(&state.db).await?;
    Ok(Json(
        videos
            .into_iter()
            .map(|v| state.media_urls.present(v))
            .collect(),
    ))
}

async fn show(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Video>> {
    let Path(id) = id?;
    let video = get_video(&state.db, id).await?;
    Ok(Json(state.media_urls.present(video)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Video>)> {
    let Json(req) = payload?;
    let video = create_video(&state.db, state.media_urls.normalize_create(req)).await?;
    tracing::info!(
        "Admin {:?} created video {}",
        extract_admin_id(&headers),
        video.id
    );
    Ok((StatusCode::CREATED, Json(state.media_urls.present(video))))
}

async fn update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateVideoRequest>, JsonRejection>,
) -> AppResult<Json<Video>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let video = update_video(&state.db, id, state.media_urls.normalize_update(req)).await?;
    tracing::info!("Admin {:?} updated video {}", extract_admin_id(&headers), id);
    Ok(Json(state.media_urls.present(video)))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    delete_video(&state.db, id).await?;
    tracing::info!("Admin {:?} deleted video {}", extract_admin_id(&headers), id);
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(show).put(update).delete(remove))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin_for_writes,
        ))
        .with_state(state)
}
