use axum::http::StatusCode;
use serde_json::json;

mod support;

use support::app;

#[tokio::test]
async fn register_token_and_me() {
    let app = app();
    let (status, created) = app
        .send("POST", "/api/user/create/", None, Some(json!({"email": "ana@EXAMPLE.com", "password": "testpass123", "name": "Ana"})))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["email"], "ana@example.com");
    assert!(created.get("password").is_none());

    let (status, body) = app
        .send("POST", "/api/user/token/", None, Some(json!({"email": "ana@example.com", "password": "testpass123"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = app.send("GET", "/api/user/me/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "Ana");
    assert_eq!(me["id"], created["id"]);
}

#[tokio::test]
async fn duplicate_email_and_short_password_rejected() {
    let app = app();
    let body = json!({"email": "dup@example.com", "password": "testpass123", "name": "Dup"});
    let (status, _) = app.send("POST", "/api/user/create/", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, errors) = app.send("POST", "/api/user/create/", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["email"][0], "user with this email already exists.");

    let (status, errors) = app
        .send("POST", "/api/user/create/", None, Some(json!({"email": "p@example.com", "password": "pw", "name": "P"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(errors.get("password").is_some());
}

#[tokio::test]
async fn wrong_password_gets_no_token() {
    let app = app();
    app.login_as("user@example.com").await;
    let (status, errors) = app
        .send("POST", "/api/user/token/", None, Some(json!({"email": "user@example.com", "password": "wrong"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["non_field_errors"][0], "Unable to authenticate with provided credentials.");
}

#[tokio::test]
async fn token_request_distinguishes_missing_from_blank() {
    let app = app();
    let (status, errors) = app.send("POST", "/api/user/token/", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["email"][0], "This field is required.");
    assert_eq!(errors["password"][0], "This field is required.");

    let (status, errors) = app
        .send("POST", "/api/user/token/", None, Some(json!({"email": "", "password": ""})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["email"][0], "This field may not be blank.");
    assert_eq!(errors["password"][0], "This field may not be blank.");
}

#[tokio::test]
async fn deactivated_user_token_stops_working() {
    let app = app();
    let token = app.login_as("leaver@example.com").await;
    let (status, _) = app.send("GET", "/api/tratamientos/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let mut user = app.state.users.get_by_email("leaver@example.com").await.unwrap().unwrap();
    user.is_active = false;
    app.state.users.save(user).await.unwrap();

    let (status, body) = app.send("GET", "/api/tratamientos/", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn public_routes_and_fallback() {
    let app = app();
    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = app.send("GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/tratamientos/").is_some());

    let (status, body) = app.send("GET", "/no/such/route", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");
}
