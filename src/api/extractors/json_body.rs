/*
 * Responsibility
 * - request body を JSON object (Map) として受け取る
 * - rule table による validation はこの Map に対して行い、その後 DTO へ変換する
 * - 壊れた JSON は 400 {"message": ...}
 * - object 以外の JSON は空 object として扱う (全 required が欠落扱いになる)
 */
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::error::AppError;

#[derive(Debug, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Ok(Self::default()),
        }
    }
}
