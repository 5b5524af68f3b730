#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use lessonhub::lessonhub_config::{CorsConfig, JwtConfig};
use lessonhub::lessonhub_db::Database;
use lessonhub::lessonhub_models::{Lesson, NewLesson, NewUser, User, UserId, UserRole};
use lessonhub::router::init_router;
use lessonhub::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "testpass123";

/// Router over a fresh in-memory store, plus direct handles for seeding.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(
            Database::in_memory(),
            &JwtConfig::new(TEST_SECRET),
            CorsConfig::from_origins("http://localhost:3000"),
        );
        Self {
            router: init_router(state.clone()),
            state,
        }
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends the request and returns the status with the JSON body
    /// (`Value::Null` for an empty body).
    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Inserts a user directly, hashed at a low bcrypt cost to keep tests fast.
    pub async fn create_user(&self, name: &str, role: UserRole) -> User {
        self.db()
            .users
            .create(NewUser {
                name: name.to_string(),
                email: generate_unique_email(),
                password_hash: bcrypt::hash(TEST_PASSWORD, 4).unwrap(),
                role,
            })
            .await
            .unwrap()
    }

    pub async fn create_lesson(&self, title: &str, teacher_id: Option<UserId>) -> Lesson {
        self.db()
            .lessons
            .create(NewLesson {
                title: title.to_string(),
                description: String::new(),
                teacher_id,
            })
            .await
            .unwrap()
    }

    /// Signs a token for `user` without going through the login route.
    pub fn token_for(&self, user: &User) -> String {
        self.state
            .tokens
            .issue(user.id, user.role, &user.name)
            .unwrap()
            .token
    }

    pub async fn login(&self, email: &str, password: &str, role: &str) -> (StatusCode, Value) {
        self.call(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": email, "password": password, "role": role}),
        ))
        .await
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
