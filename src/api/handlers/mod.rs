pub mod courses;
pub mod root;
pub mod users;
