/*
 * Responsibility
 * - /users handler
 * - GET: 認証済みユーザー自身を返す (Path ではなく AuthCtx から)
 * - POST: rule table で validation → password を hash → repo
 */
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::{
        dto::{
            from_body,
            users::{CreateUserRequest, UserResponse},
        },
        extractors::{AuthCtxExtractor, JsonObject},
    },
    error::AppError,
    repos::user_repo::{self, NewUser},
    state::AppState,
    validation::{self, Mode, USER_RULES},
};

pub async fn current_user(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<UserResponse> {
    Json(UserResponse {
        first_name: ctx.first_name,
        last_name: ctx.last_name,
        email_address: ctx.email_address,
    })
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    validation::check(USER_RULES, &body, Mode::Create).map_err(AppError::Validation)?;
    let req: CreateUserRequest = from_body(body)?;

    // 平文はここで捨てる
    let password_hash = state.password.hash(req.password).await.map_err(|e| {
        tracing::error!(error = ?e, "password hashing failed");
        AppError::Internal
    })?;

    let row = user_repo::create(
        &state.db,
        NewUser {
            first_name: &req.first_name,
            last_name: &req.last_name,
            email_address: &req.email_address,
            password_hash: &password_hash,
        },
    )
    .await
    .map_err(|e| AppError::from_write(USER_RULES, e))?;

    tracing::info!(user_id = row.id, "user created");

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
