use crate::database::DbPool;
use crate::models::video::{CreateVideoRequest, UpdateVideoRequest, Video, timestamp_now};
use crate::utils::error::{AppError, AppResult};

const DEFAULT_DURATION: &str = "00:00";
const DEFAULT_VIEWS: &str = "0";

pub async fn list_videos(pool: &DbPool) -> AppResult<Vec<Video>> {
    let videos =
        sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY created_at DESC, id DESC")
            .fetch_all(pool.as_ref())
            .await?;

    tracing::debug!("Listed {} videos", videos.len());
    Ok(videos)
}

pub async fn get_video(pool: &DbPool, id: i64) -> AppResult<Video> {
    sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
}

pub async fn create_video(pool: &DbPool, request: CreateVideoRequest) -> AppResult<Video> {
    insert_video(pool, request, timestamp_now()).await
}

pub(crate) async fn insert_video(
    pool: &DbPool,
    request: CreateVideoRequest,
    created_at: String,
) -> AppResult<Video> {
    let result = sqlx::query(
        "INSERT INTO videos (title, description, thumbnail, video_url, duration, category, views, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&request.title)
    .bind(&request.description)
    .bind(request.thumbnail.unwrap_or_default())
    .bind(request.video_url.unwrap_or_default())
    .bind(request.duration.unwrap_or_else(|| DEFAULT_DURATION.to_string()))
    .bind(request.category.unwrap_or_default())
    .bind(request.views.unwrap_or_else(|| DEFAULT_VIEWS.to_string()))
    .bind(&created_at)
    .execute(pool.as_ref())
    .await?;

    let video = get_video(pool, result.last_insert_rowid()).await?;

    tracing::info!("Video created: id={}, title={}", video.id, video.title);
    Ok(video)
}

pub async fn update_video(pool: &DbPool, id: i64, request: UpdateVideoRequest) -> AppResult<Video> {
    let result = sqlx::query(
        "UPDATE videos SET
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            thumbnail = COALESCE(?, thumbnail),
            video_url = COALESCE(?, video_url),
            duration = COALESCE(?, duration),
            category = COALESCE(?, category),
            views = COALESCE(?, views)
         WHERE id = ?",
    )
    .bind(&request.title)
    .bind(&request.description)
    .bind(&request.thumbnail)
    .bind(&request.video_url)
    .bind(&request.duration)
    .bind(&request.category)
    .bind(&request.views)
    .bind(id)
    .execute(pool.as_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Video not found".to_string()));
    }

    let video = get_video(pool, id).await?;

    tracing::info!("Video updated: id={}", id);
    Ok(video)
}

pub async fn delete_video(pool: &DbPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM videos WHERE id = ?")
        .bind(id)
        .execute(pool.as_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Video not found".to_string()));
    }

    tracing::info!("Video deleted: id={}", id);
    Ok(())
}

pub async fn count_videos(pool: &DbPool) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
        .fetch_one(pool.as_ref())
        .await?;
    Ok(count)
}
