use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::controller::{
    create_lesson, delete_lesson, get_lesson, get_student_lessons, get_teacher_lessons,
    list_lessons, update_lesson,
};
use crate::middleware::auth::authenticate;
use crate::middleware::role::{ADMIN_ONLY, STUDENT_ONLY, TEACHER_ONLY, require_role};
use crate::modules::enrollments::router::init_enrollments_router;
use crate::state::AppState;

/// `/lessons`: public reads, admin writes, plus the roster routes.
pub fn init_lessons_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/", get(list_lessons))
        .route("/{id}", get(get_lesson));

    let admin_routes = Router::new()
        .route("/", post(create_lesson))
        .route("/{id}", put(update_lesson).delete(delete_lesson))
        .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(init_enrollments_router(state))
}

/// `/teacher`: the calling teacher's lessons.
pub fn init_teacher_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/lessons", get(get_teacher_lessons))
        .route_layer(middleware::from_fn_with_state(TEACHER_ONLY, require_role))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

/// `/student`: the calling student's lessons.
pub fn init_student_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/lessons", get(get_student_lessons))
        .route_layer(middleware::from_fn_with_state(STUDENT_ONLY, require_role))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
