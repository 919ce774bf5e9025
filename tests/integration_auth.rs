mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

use classdesk::classdesk_auth::{Claims, verify_token};
use common::{TEST_SECRET, TestApp, admin_body, faculty_body, student_body, unique};

#[tokio::test]
async fn test_register_student_returns_token_and_account() {
    let app = TestApp::new();
    let username = unique("ada");

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            student_body(&username, "S-100"),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());

    let user = &body["user"];
    assert_eq!(user["username"], username.as_str());
    assert_eq!(user["role"], "Student");
    assert_eq!(user["studentId"], "S-100");
    assert_eq!(user["year"], 2);
    assert!(user["id"].is_string());
    assert!(user["createdAt"].is_string());
}

#[tokio::test]
async fn test_register_never_returns_credential_hash() {
    let app = TestApp::new();

    let (_, body) = app
        .post("/api/auth/register", None, admin_body(&unique("root")))
        .await;

    let text = body.to_string();
    assert!(!text.contains("pass123"));
    assert!(!text.contains("$2b$"));
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_token_subject_is_account_id() {
    let app = TestApp::new();
    let (token, user) = app.admin().await;

    let claims = verify_token(&token, &app.state.jwt_config).unwrap();
    assert_eq!(claims.sub.to_string(), user["id"].as_str().unwrap());
    assert_eq!(claims.exp - claims.iat, app.state.jwt_config.token_expiry);
}

#[tokio::test]
async fn test_register_missing_student_id() {
    let app = TestApp::new();
    let mut body = student_body(&unique("s"), "unused");
    body.as_object_mut().unwrap().remove("studentId");

    let (status, body) = app.post("/api/auth/register", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student ID is required");
}

#[tokio::test]
async fn test_register_year_as_string() {
    let app = TestApp::new();
    let mut body = student_body(&unique("s"), &unique("S"));
    body["year"] = json!("4");

    let (_, user) = app.register(body).await;
    assert_eq!(user["year"], 4);
}

#[tokio::test]
async fn test_register_invalid_role() {
    let app = TestApp::new();
    let mut body = admin_body(&unique("x"));
    body["role"] = json!("Janitor");

    let (status, body) = app.post("/api/auth/register", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid role specified");
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::new();
    let mut body = admin_body(&unique("x"));
    body["password"] = json!("12345");

    let (status, body) = app.post("/api/auth/register", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn test_register_reports_role_before_field_rules() {
    let app = TestApp::new();
    let mut body = student_body(&unique("s"), &unique("S"));
    body["role"] = json!("Janitor");
    body["password"] = json!("abc");

    let (status, body) = app.post("/api/auth/register", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid role specified");
}

#[tokio::test]
async fn test_register_missing_student_id_reported_before_year_range() {
    let app = TestApp::new();
    let mut body = student_body(&unique("s"), &unique("S"));
    body.as_object_mut().unwrap().remove("studentId");
    body["year"] = json!(9);

    let (status, body) = app.post("/api/auth/register", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student ID is required");
}

#[tokio::test]
async fn test_register_faculty_missing_department() {
    let app = TestApp::new();
    let mut body = faculty_body(&unique("f"), &unique("F"));
    body.as_object_mut().unwrap().remove("faculty");

    let (status, body) = app.post("/api/auth/register", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Faculty is required");
}

#[tokio::test]
async fn test_username_unique_across_roles() {
    let app = TestApp::new();
    let username = unique("taken");
    app.register(admin_body(&username)).await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            student_body(&username, &unique("S")),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");
}

#[tokio::test]
async fn test_student_id_unique() {
    let app = TestApp::new();
    app.register(student_body(&unique("a"), "S-DUP")).await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            student_body(&unique("b"), "S-DUP"),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student ID already exists");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let username = unique("login");
    app.register(admin_body(&username)).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": username, "password": "pass123" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["username"], username.as_str());
    assert_eq!(body["user"]["role"], "Admin");
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::new();
    let username = unique("login");
    app.register(admin_body(&username)).await;

    let (wrong_status, wrong_body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": username, "password": "wrong-password" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "nobody-here", "password": "pass123" }),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], "Incorrect username or password");
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/auth/login", None, json!({ "username": "someone" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide username and password");
}

#[tokio::test]
async fn test_me_returns_current_account() {
    let app = TestApp::new();
    let (token, user) = app.faculty().await;

    let (status, body) = app.get("/api/auth/me", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user["id"]);
    assert_eq!(body["user"]["role"], "Faculty");
    assert_eq!(body["user"]["faculty"], "Engineering");
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/api/auth/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "You are not logged in. Please log in to get access."
    );
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/auth/me", "not.a.token").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token. Please log in again.");
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let app = TestApp::new();
    let (_, user) = app.admin().await;

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user["id"].as_str().unwrap().parse().unwrap(),
        iat: now - 7200,
        exp: now - 1,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let (status, _) = app.get("/api/auth/me", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_token_signed_by_other_secret() {
    let app = TestApp::new();
    let (_, user) = app.admin().await;

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user["id"].as_str().unwrap().parse().unwrap(),
        iat: now,
        exp: now + 3600,
    };
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret-entirely-different"),
    )
    .unwrap();

    let (status, _) = app.get("/api/auth/me", &forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/auth/register", None, json!(["not", "an", "object"]))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}
