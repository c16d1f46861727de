/*
 * Responsibility
 * - request/response DTO
 * - validation 済みの JSON object から DTO への変換 (型違いは 400 errors)
 */
pub mod courses;
pub mod users;

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::{Map, Value};

use crate::error::AppError;

pub fn from_body<T: DeserializeOwned>(body: Map<String, Value>) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(body)).map_err(|e| AppError::validation(e.to_string()))
}

// Tri-state for nullable columns on partial update:
// - missing: None (#[serde(default)])
// - null: Some(None)
// - value: Some(Some(v))
pub(crate) fn double_option<'de, T, D>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}
