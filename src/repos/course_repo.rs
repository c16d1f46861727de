/*
 * Responsibility
 * - Courses CRUD
 * - 読み取りは owner (Users) を JOIN して公開カラムだけ返す
 * - userId の FK (CASCADE) 前提で削除挙動を意識
 */
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseRow {
    pub id: i64,

    pub title: String,
    pub description: String,

    #[sqlx(rename = "estimatedTime")]
    pub estimated_time: Option<String>,
    #[sqlx(rename = "materialsNeeded")]
    pub materials_needed: Option<String>,

    #[sqlx(rename = "userId")]
    pub user_id: i64,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Course joined with the public columns of its owning user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseWithOwnerRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "estimatedTime")]
    pub estimated_time: Option<String>,
    #[sqlx(rename = "materialsNeeded")]
    pub materials_needed: Option<String>,

    #[sqlx(rename = "ownerId")]
    pub owner_id: i64,
    #[sqlx(rename = "ownerFirstName")]
    pub owner_first_name: String,
    #[sqlx(rename = "ownerLastName")]
    pub owner_last_name: String,
    #[sqlx(rename = "ownerEmailAddress")]
    pub owner_email_address: String,
}

#[derive(Debug)]
pub struct NewCourse<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub estimated_time: Option<&'a str>,
    pub materials_needed: Option<&'a str>,
    pub user_id: i64,
}

/// Partial update. `None` leaves the column untouched.
///
/// Nullable columns are tri-state:
/// - `None`: do not update
/// - `Some(None)`: set NULL
/// - `Some(Some(v))`: set v
#[derive(Debug, Default)]
pub struct CourseChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub estimated_time: Option<Option<&'a str>>,
    pub materials_needed: Option<Option<&'a str>>,
    pub user_id: Option<i64>,
}

const SELECT_WITH_OWNER: &str = r#"
    SELECT
        c."id", c."title", c."description", c."estimatedTime", c."materialsNeeded",
        u."id" AS "ownerId",
        u."firstName" AS "ownerFirstName",
        u."lastName" AS "ownerLastName",
        u."emailAddress" AS "ownerEmailAddress"
    FROM "Courses" c
    INNER JOIN "Users" u ON u."id" = c."userId"
"#;

pub async fn list(pool: &SqlitePool) -> RepoResult<Vec<CourseWithOwnerRow>> {
    let sql = format!(r#"{SELECT_WITH_OWNER} ORDER BY c."id" ASC"#);
    let rows = sqlx::query_as::<_, CourseWithOwnerRow>(&sql)
        .fetch_all(pool)
        .await
        .map_err(RepoError::from_sqlx)?;

    Ok(rows)
}

pub async fn get(pool: &SqlitePool, course_id: i64) -> RepoResult<Option<CourseWithOwnerRow>> {
    let sql = format!(r#"{SELECT_WITH_OWNER} WHERE c."id" = $1"#);
    let row = sqlx::query_as::<_, CourseWithOwnerRow>(&sql)
        .bind(course_id)
        .fetch_optional(pool)
        .await
        .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn create(pool: &SqlitePool, new: NewCourse<'_>) -> RepoResult<CourseRow> {
    let now = Utc::now();
    let row = sqlx::query_as::<_, CourseRow>(
        r#"
        INSERT INTO "Courses"
            ("title", "description", "estimatedTime", "materialsNeeded", "userId", "createdAt", "updatedAt")
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING
            "id", "title", "description", "estimatedTime", "materialsNeeded", "userId",
            "createdAt", "updatedAt"
        "#,
    )
    .bind(new.title)
    .bind(new.description)
    .bind(new.estimated_time)
    .bind(new.materials_needed)
    .bind(new.user_id)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    pool: &SqlitePool,
    course_id: i64,
    changes: CourseChanges<'_>,
) -> RepoResult<Option<CourseRow>> {
    let row = sqlx::query_as::<_, CourseRow>(
        r#"
        UPDATE "Courses"
        SET
            "title" = COALESCE($2, "title"),
            "description" = COALESCE($3, "description"),
            "estimatedTime" = CASE WHEN $4 THEN $5 ELSE "estimatedTime" END,
            "materialsNeeded" = CASE WHEN $6 THEN $7 ELSE "materialsNeeded" END,
            "userId" = COALESCE($8, "userId"),
            "updatedAt" = $9
        WHERE "id" = $1
        RETURNING
            "id", "title", "description", "estimatedTime", "materialsNeeded", "userId",
            "createdAt", "updatedAt"
        "#,
    )
    .bind(course_id)
    .bind(changes.title)
    .bind(changes.description)
    .bind(changes.estimated_time.is_some()) // $4: flag to set estimatedTime
    .bind(changes.estimated_time.flatten()) // $5: new estimatedTime value
    .bind(changes.materials_needed.is_some()) // $6: flag to set materialsNeeded
    .bind(changes.materials_needed.flatten()) // $7: new materialsNeeded value
    .bind(changes.user_id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(pool: &SqlitePool, course_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM "Courses"
        WHERE "id" = $1
        "#,
    )
    .bind(course_id)
    .execute(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(result.rows_affected() > 0)
}
