/*
 * Responsibility
 * - リソースごとの「意味付きID型」を宣言する
 *
 * 以下に pub で列挙するものは、./mod.rs 経由で全て公開されるため注意
 */
use super::core::{Resource, ResourceId};

// courses
pub enum CourseTag {}

impl Resource for CourseTag {
    const NAME: &'static str = "Course";
}

pub type CourseId = ResourceId<CourseTag>;
