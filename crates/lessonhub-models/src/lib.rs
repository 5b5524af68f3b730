//! # LessonHub Models
//!
//! Domain entities and request/response DTOs shared by the API, the
//! repositories and the token service.
//!
//! - [`ids`]: strongly typed identifiers
//! - [`users`]: identities, roles and registration DTOs
//! - [`lessons`]: lessons, rosters and enrollment DTOs
//! - [`auth`]: login request/response

pub mod auth;
pub mod ids;
pub mod lessons;
pub mod users;

pub use auth::{LoginRequest, LoginResponse};
pub use ids::{LessonId, UserId};
pub use lessons::{
    AssignTeacherDto, CreateLessonDto, EnrolledStudent, EnrollStudentDto, Lesson,
    LessonWithStats, NewLesson, UpdateLessonDto,
};
pub use users::{NewUser, RegisterRequest, UpdateUserDto, User, UserCredentials, UserRole};
