/*
 * Responsibility
 * - Courses の request/response DTO
 * - owner は "User" キーで埋め込む
 */
use serde::{Deserialize, Serialize};

use super::double_option;
use super::users::OwnerResponse;
use crate::repos::course_repo::{CourseChanges, CourseWithOwnerRow, NewCourse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
}

impl CreateCourseRequest {
    pub fn as_new(&self) -> NewCourse<'_> {
        NewCourse {
            title: &self.title,
            description: &self.description,
            estimated_time: self.estimated_time.as_deref(),
            materials_needed: self.materials_needed.as_deref(),
            user_id: self.user_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub estimated_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub materials_needed: Option<Option<String>>,
    pub user_id: Option<i64>,
}

impl UpdateCourseRequest {
    pub fn as_changes(&self) -> CourseChanges<'_> {
        CourseChanges {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            estimated_time: self.estimated_time.as_ref().map(|inner| inner.as_deref()),
            materials_needed: self.materials_needed.as_ref().map(|inner| inner.as_deref()),
            user_id: self.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    #[serde(rename = "User")]
    pub user: OwnerResponse,
}

impl From<CourseWithOwnerRow> for CourseResponse {
    fn from(row: CourseWithOwnerRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            estimated_time: row.estimated_time,
            materials_needed: row.materials_needed,
            user: OwnerResponse {
                id: row.owner_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email_address: row.owner_email_address,
            },
        }
    }
}
