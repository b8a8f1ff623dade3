use axum::{
    Router,
    extract::Path,
    response::{Html, Redirect},
    routing::get,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::middleware::auth::require_admin_page;

const INDEX_PAGE: &str = include_str!("templates/index.html");
const PLAYER_PAGE: &str = include_str!("templates/player.html");
const LOGIN_PAGE: &str = include_str!("templates/login.html");
const DASHBOARD_PAGE: &str = include_str!("templates/dashboard.html");
const VIDEO_FORM_PAGE: &str = include_str!("templates/video_form.html");

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

// The page script reads the id from its own path.
async fn player(Path(_id): Path<i64>) -> Html<&'static str> {
    Html(PLAYER_PAGE)
}

async fn login() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

async fn admin_root() -> Redirect {
    Redirect::temporary("/admin/dashboard")
}

async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

async fn new_video() -> Html<&'static str> {
    Html(VIDEO_FORM_PAGE)
}

async fn edit_video(Path(_id): Path<i64>) -> Html<&'static str> {
    Html(VIDEO_FORM_PAGE)
}

pub fn routes(state: Arc<AppState>) -> Router {
    let admin_pages = Router::new()
        .route("/admin", get(admin_root))
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/video/new", get(new_video))
        .route("/admin/video/:id/edit", get(edit_video))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin_page,
        ));

    Router::new()
        .route("/", get(index))
        .route("/video/:id", get(player))
        .route("/admin/login", get(login))
        .merge(admin_pages)
        .with_state(state)
}
