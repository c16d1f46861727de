/*
 * Responsibility
 * - Users テーブル向け SQLx 操作
 * - SqlitePool を受け取り create / lookup を提供
 * - DB エラーは RepoError (制約違反は Constraint) で返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    #[sqlx(rename = "emailAddress")]
    pub email_address: String,
    // bcrypt hash
    pub password: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email_address: &'a str,
    pub password_hash: &'a str,
}

pub async fn create(db: &SqlitePool, new: NewUser<'_>) -> RepoResult<UserRow> {
    let now = Utc::now();
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO "Users" ("firstName", "lastName", "emailAddress", "password", "createdAt", "updatedAt")
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING "id", "firstName", "lastName", "emailAddress", "password", "createdAt", "updatedAt"
        "#,
    )
    .bind(new.first_name)
    .bind(new.last_name)
    .bind(new.email_address)
    .bind(new.password_hash)
    .bind(now)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

// emailAddress の比較は store の等価比較 (SQLite BINARY = case-sensitive) に任せる
pub async fn find_by_email(db: &SqlitePool, email_address: &str) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "id", "firstName", "lastName", "emailAddress", "password", "createdAt", "updatedAt"
        FROM "Users"
        WHERE "emailAddress" = $1
        "#,
    )
    .bind(email_address)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}
