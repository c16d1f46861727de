pub mod course_repo;
pub mod error;
pub mod user_repo;
