/*
 * Responsibility
 * - Path の String を受け、内部 ID (i64) へ変換する
 * - 数値として解釈できない ID は「存在しないリソース」と同じ扱い (404)
 * 置くもの
 *  - ResourceId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts for ResourceId<T>
 * 置かないもの
 *  - Course といった具体リソース名 (types.rs)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Resource tag: names the resource in 404 responses.
pub trait Resource {
    const NAME: &'static str;
}

#[derive(Clone, Copy)]
pub struct ResourceId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> ResourceId<T> {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<S, T> FromRequestParts<S> for ResourceId<T>
where
    S: Send + Sync,
    T: Resource + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound(T::NAME))?;

        let id = raw.parse::<i64>().map_err(|_| {
            tracing::info!(id = %raw, "{} Not Found", T::NAME);
            AppError::NotFound(T::NAME)
        })?;

        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for ResourceId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceId").field("id", &self.id).finish()
    }
}
