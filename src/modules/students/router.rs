use axum::{Router, middleware, routing::get};

use super::controller::{get_student, get_students, update_student};
use crate::middleware::auth::authenticate;
use crate::middleware::role::{ADMIN_ONLY, require_role};
use crate::state::AppState;

pub fn init_students_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_students))
        .route("/{id}", get(get_student).put(update_student))
        .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_role))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
