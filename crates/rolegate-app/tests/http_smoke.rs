mod common;

use axum::http::StatusCode;
use common::{app, app_with_ttl, read_json};
use http_helpers::{bearer_request, empty_request, json_request};
use serde_json::json;
use tower::ServiceExt;

/// Send a request and return status and JSON body
async fn send(
    app: &axum::Router,
    request: axum::http::Request<axum::body::Body>,
) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = read_json(response).await;
    assert_no_password_field(&body);
    (status, body)
}

fn assert_no_password_field(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                assert!(!key.contains("password"), "response leaked {}", key);
                assert_no_password_field(nested);
            }
        }
        serde_json::Value::Array(items) => items.iter().for_each(assert_no_password_field),
        serde_json::Value::String(text) => assert!(!text.starts_with("$argon2")),
        _ => {}
    }
}

async fn id_of(app: &axum::Router, uri: &str, body: serde_json::Value) -> String {
    let (status, body) = send(app, json_request("POST", uri, body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_str().expect("id").to_string()
}

#[tokio::test]
async fn health_ok() {
    let app = app();
    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn viewer_can_read_but_not_write() {
    let app = app();

    let read = id_of(&app, "/permissions", json!({"name": "read"})).await;
    let viewer = id_of(&app, "/roles", json!({"name": "viewer"})).await;

    let (status, body) = send(
        &app,
        empty_request("POST", &format!("/roles/{}/permissions/{}", viewer, read)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], true);

    let alice = id_of(
        &app,
        "/users",
        json!({"username": "alice", "password": "secret"}),
    )
    .await;

    let (status, body) = send(
        &app,
        empty_request("POST", &format!("/users/{}/roles/{}", alice, viewer)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], true);

    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/users/{}/permissions/read", alice)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_permission"], true);
    assert_eq!(body["permission"], "read");

    let (_, body) = send(
        &app,
        empty_request("GET", &format!("/users/{}/permissions/write", alice)),
    )
    .await;
    assert_eq!(body["has_permission"], false);

    let (_, body) = send(&app, empty_request("GET", &format!("/users/{}", alice))).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["roles"][0]["name"], "viewer");
    assert_eq!(body["roles"][0]["permissions"][0]["name"], "read");

    let (_, body) = send(
        &app,
        empty_request("GET", &format!("/users/{}/permissions", alice)),
    )
    .await;
    assert_eq!(body["permissions"], json!(["read"]));
}

#[tokio::test]
async fn duplicate_assignment_reports_not_created() {
    let app = app();
    let read = id_of(&app, "/permissions", json!({"name": "read"})).await;
    let viewer = id_of(&app, "/roles", json!({"name": "viewer"})).await;
    let uri = format!("/roles/{}/permissions/{}", viewer, read);

    send(&app, empty_request("POST", &uri)).await;
    let (status, body) = send(&app, empty_request("POST", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], false);

    let (_, body) = send(&app, empty_request("GET", &format!("/roles/{}", viewer))).await;
    assert_eq!(body["permissions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn error_codes() {
    let app = app();
    id_of(&app, "/roles", json!({"name": "viewer"})).await;

    let (status, body) = send(&app, json_request("POST", "/roles", json!({"name": "viewer"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "duplicate_name");

    let (status, body) = send(&app, json_request("POST", "/roles", json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation");

    let (status, body) = send(
        &app,
        json_request("POST", "/users", json!({"username": "bob", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation");

    let (status, body) = send(&app, empty_request("GET", "/users/999/permissions/read")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = send(&app, empty_request("POST", "/users/999/roles/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request("GET", "/permissions/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_and_current_user() {
    let app = app();
    let alice = id_of(
        &app,
        "/users",
        json!({"username": "alice", "password": "secret"}),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/users/login",
            json!({"username": "alice", "password": "secret"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    let token = body["token"].as_str().expect("token").to_string();

    let (status, body) = send(&app, bearer_request("/users/me", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], alice.as_str());
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let app = app();
    id_of(
        &app,
        "/users",
        json!({"username": "alice", "password": "secret"}),
    )
    .await;

    let (wrong_status, wrong_body) = send(
        &app,
        json_request(
            "POST",
            "/users/login",
            json!({"username": "alice", "password": "nope"}),
        ),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        json_request(
            "POST",
            "/users/login",
            json!({"username": "mallory", "password": "nope"}),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn current_user_requires_bearer() {
    let app = app();

    let (status, body) = send(&app, empty_request("GET", "/users/me")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You are not logged in");

    let (status, body) = send(&app, bearer_request("/users/me", "garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn expired_token_rejected() {
    let app = app_with_ttl(chrono::Duration::seconds(-60));
    id_of(
        &app,
        "/users",
        json!({"username": "alice", "password": "secret"}),
    )
    .await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/users/login",
            json!({"username": "alice", "password": "secret"}),
        ),
    )
    .await;
    let token = body["token"].as_str().expect("token").to_string();

    let (status, body) = send(&app, bearer_request("/users/me", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn token_signed_elsewhere_rejected() {
    let app = app();
    let alice = id_of(
        &app,
        "/users",
        json!({"username": "alice", "password": "secret"}),
    )
    .await;

    let forged = identity::generate_token(chrono::Duration::hours(1), &alice, b"other-secret")
        .expect("token");
    let (status, _) = send(&app, bearer_request("/users/me", &forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
