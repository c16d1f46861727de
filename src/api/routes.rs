/*
 * Responsibility
 * - /api 配下の URL 構造を定義
 * - Basic 認証が必要な method だけ auth::basic::require で包む
 *   (authenticate → validate → handle の順になる)
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api::handlers::{
    courses::{create_course, delete_course, get_course, list_courses, update_course},
    root::health,
    users::{create_user, current_user},
};
use crate::middleware::auth::basic::require;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/users",
            require(get(current_user), state).post(create_user),
        )
        .route(
            "/courses",
            require(post(create_course), state).get(list_courses),
        )
        .route(
            "/courses/{id}",
            require(put(update_course).delete(delete_course), state).get(get_course),
        )
}
