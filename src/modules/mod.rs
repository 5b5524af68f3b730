pub mod auth;
pub mod enrollments;
pub mod lessons;
pub mod students;
