use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    routing::post,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::AppState;
use crate::middleware::auth::require_admin;
use crate::utils::error::{AppError, AppResult};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub public_url: String,
}

fn multipart_error(e: MultipartError) -> AppError {
    tracing::debug!("Rejected multipart body: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File exceeds the upload size limit.".to_string())
    } else {
        AppError::BadRequest("Malformed multipart body.".to_string())
    }
}

async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?;

        let stored = state
            .media_store
            .store(&original_name, content_type.as_deref(), &data)
            .await?;
        tracing::info!("Admin upload stored as {:?}: {}", stored.kind, stored.public_url);

        return Ok(Json(UploadResponse {
            public_url: stored.public_url,
        }));
    }

    Err(AppError::BadRequest("No file uploaded.".to_string()))
}

pub fn routes(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", post(upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ))
        .with_state(state)
}
