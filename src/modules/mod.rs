pub mod attendance;
pub mod auth;
pub mod courses;
pub mod departments;
pub mod faculty;
pub mod students;
pub mod users;
