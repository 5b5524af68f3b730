use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::controller::{
    add_student, assign_teacher, enroll_student, list_students, remove_student,
};
use crate::middleware::auth::authenticate;
use crate::middleware::role::{ADMIN_ONLY, ADMIN_OR_TEACHER, TEACHER_ONLY, require_role};
use crate::state::AppState;

/// Roster and assignment routes, nested under `/lessons`.
pub fn init_enrollments_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/{id}/assign-teacher", post(assign_teacher))
        .route("/{id}/enroll-student", post(enroll_student))
        .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_role));

    let roster_routes = Router::new()
        .route("/{id}/students", post(add_student))
        .route("/{id}/students/{student_id}", delete(remove_student))
        .route_layer(middleware::from_fn_with_state(ADMIN_OR_TEACHER, require_role));

    let teacher_routes = Router::new()
        .route("/{id}/students", get(list_students))
        .route_layer(middleware::from_fn_with_state(TEACHER_ONLY, require_role));

    Router::new()
        .merge(admin_routes)
        .merge(roster_routes)
        .merge(teacher_routes)
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
