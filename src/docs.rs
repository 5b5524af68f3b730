use lessonhub_core::ErrorResponse;
use lessonhub_models::{
    AssignTeacherDto, CreateLessonDto, EnrollStudentDto, EnrolledStudent, Lesson, LessonWithStats,
    LoginRequest, LoginResponse, RegisterRequest, UpdateLessonDto, UpdateUserDto, User, UserRole,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::list_lessons,
        crate::modules::lessons::controller::get_lesson,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::lessons::controller::get_teacher_lessons,
        crate::modules::lessons::controller::get_student_lessons,
        crate::modules::enrollments::controller::assign_teacher,
        crate::modules::enrollments::controller::enroll_student,
        crate::modules::enrollments::controller::add_student,
        crate::modules::enrollments::controller::remove_student,
        crate::modules::enrollments::controller::list_students,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateUserDto,
            Lesson,
            LessonWithStats,
            CreateLessonDto,
            UpdateLessonDto,
            AssignTeacherDto,
            EnrollStudentDto,
            EnrolledStudent,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Lessons", description = "Lesson catalogue and per-role lesson lists"),
        (name = "Enrollments", description = "Teacher assignment and lesson rosters"),
        (name = "Students", description = "Student administration")
    ),
    info(
        title = "LessonHub API",
        version = "0.1.0",
        description = "Role-based lesson management: admins run the catalogue, teachers see their rosters, students see their lessons.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
