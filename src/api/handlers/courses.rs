/*
 * Responsibility
 * - /courses 系 CRUD handler
 * - Path の :id は extractor で i64 に変換 (数値でなければ 404)
 * - 書き込み系は route 側で Basic 認証済み。owner との一致は確認しない
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
            courses::{CourseResponse, CreateCourseRequest, UpdateCourseRequest},
            from_body,
        },
        extractors::{
            CourseId, JsonObject,
            resource_id::{CourseTag, Resource},
        },
    },
    error::AppError,
    repos::course_repo,
    state::AppState,
    validation::{self, COURSE_RULES, Mode},
};

fn not_found(course_id: i64) -> AppError {
    tracing::info!(course_id, "Course Not Found");
    AppError::NotFound(CourseTag::NAME)
}

pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let rows = course_repo::list(&state.db).await?;

    Ok(Json(rows.into_iter().map(CourseResponse::from).collect()))
}

pub async fn get_course(
    State(state): State<AppState>,
    course_id: CourseId,
) -> Result<Json<CourseResponse>, AppError> {
    let row = course_repo::get(&state.db, course_id.id)
        .await?
        .ok_or_else(|| not_found(course_id.id))?;

    Ok(Json(row.into()))
}

pub async fn create_course(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    validation::check(COURSE_RULES, &body, Mode::Create).map_err(AppError::Validation)?;
    let req: CreateCourseRequest = from_body(body)?;

    let row = course_repo::create(&state.db, req.as_new())
        .await
        .map_err(|e| AppError::from_write(COURSE_RULES, e))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("courses/{}", row.id))],
    ))
}

pub async fn update_course(
    State(state): State<AppState>,
    course_id: CourseId,
    JsonObject(body): JsonObject,
) -> Result<StatusCode, AppError> {
    validation::check(COURSE_RULES, &body, Mode::Update).map_err(AppError::Validation)?;
    let req: UpdateCourseRequest = from_body(body)?;

    course_repo::update(&state.db, course_id.id, req.as_changes())
        .await
        .map_err(|e| AppError::from_write(COURSE_RULES, e))?
        .ok_or_else(|| not_found(course_id.id))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_course(
    State(state): State<AppState>,
    course_id: CourseId,
) -> Result<StatusCode, AppError> {
    let deleted = course_repo::delete(&state.db, course_id.id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(course_id.id))
    }
}
