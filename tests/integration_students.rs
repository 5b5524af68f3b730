mod common;

use axum::http::StatusCode;
use common::{TestApp, empty_request, json_request};
use lessonhub::lessonhub_models::UserRole;
use serde_json::json;

#[tokio::test]
async fn test_admin_lists_students() {
    let app = TestApp::new();
    let admin = app.create_user("Admin", UserRole::Admin).await;
    let s1 = app.create_user("S1", UserRole::Student).await;
    let s2 = app.create_user("S2", UserRole::Student).await;
    app.create_user("T1", UserRole::Teacher).await;

    let (status, body) = app
        .call(empty_request("GET", "/api/students", Some(&app.token_for(&admin))))
        .await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![s1.id.to_string(), s2.id.to_string()]);
    assert!(body[0].get("password").is_none());
}

#[tokio::test]
async fn test_get_student() {
    let app = TestApp::new();
    let admin = app.create_user("Admin", UserRole::Admin).await;
    let student = app.create_user("S1", UserRole::Student).await;
    let teacher = app.create_user("T1", UserRole::Teacher).await;
    let token = app.token_for(&admin);

    let (status, body) = app
        .call(empty_request(
            "GET",
            &format!("/api/students/{}", student.id),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], student.email);
    assert_eq!(body["role"], "student");

    let (status, body) = app
        .call(empty_request(
            "GET",
            &format!("/api/students/{}", teacher.id),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
}

#[tokio::test]
async fn test_update_student() {
    let app = TestApp::new();
    let admin = app.create_user("Admin", UserRole::Admin).await;
    let student = app.create_user("S1", UserRole::Student).await;
    let other = app.create_user("S2", UserRole::Student).await;
    let token = app.token_for(&admin);
    let uri = format!("/api/students/{}", student.id);

    let (status, body) = app
        .call(json_request(
            "PUT",
            &uri,
            Some(&token),
            json!({"name": "Sam Student"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sam Student");
    assert_eq!(body["email"], student.email);

    let (status, _) = app
        .call(json_request(
            "PUT",
            &uri,
            Some(&token),
            json!({"email": other.email}),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .call(json_request(
            "PUT",
            &uri,
            Some(&token),
            json!({"email": "not-an-email"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_student_routes_are_admin_only() {
    let app = TestApp::new();
    let teacher = app.create_user("T1", UserRole::Teacher).await;
    let student = app.create_user("S1", UserRole::Student).await;

    for user in [&teacher, &student] {
        let (status, body) = app
            .call(empty_request("GET", "/api/students", Some(&app.token_for(user))))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["error"],
            format!(
                "Access denied. Required roles: admin, but user has role: {}",
                user.role
            )
        );
    }

    let (status, _) = app
        .call(json_request(
            "PUT",
            &format!("/api/students/{}", student.id),
            Some(&app.token_for(&student)),
            json!({"name": "Hacker"}),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
