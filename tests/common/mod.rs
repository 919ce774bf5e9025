#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use classdesk::classdesk_config::{CorsConfig, JwtConfig};
use classdesk::classdesk_db::Stores;
use classdesk::router::init_router;
use classdesk::state::AppState;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: 3600,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// A fresh app over an empty in-memory store.
    pub fn new() -> Self {
        let state = AppState::new(
            Stores::in_memory(),
            test_jwt_config(),
            CorsConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
        );

        Self {
            router: init_router(state.clone()),
            state,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Registers through the API and returns `(token, user)`.
    pub async fn register(&self, body: Value) -> (String, Value) {
        let (status, body) = self.post("/api/auth/register", None, body).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        let token = body["token"].as_str().unwrap().to_string();
        (token, body["user"].clone())
    }

    pub async fn admin(&self) -> (String, Value) {
        self.register(admin_body(&unique("admin"))).await
    }

    pub async fn student(&self) -> (String, Value) {
        self.register(student_body(&unique("student"), &unique("S")))
            .await
    }

    pub async fn faculty(&self) -> (String, Value) {
        self.register(faculty_body(&unique("faculty"), &unique("F")))
            .await
    }

    /// Creates a classroom as `admin_token` and returns its id.
    pub async fn classroom(&self, admin_token: &str, name: &str, capacity: i64) -> String {
        let (status, body) = self
            .post(
                "/api/classrooms",
                Some(admin_token),
                json!({ "name": name, "capacity": capacity }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create classroom failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Creates a subject as `admin_token` and returns its id.
    pub async fn subject(&self, admin_token: &str, name: &str, code: &str) -> String {
        let (status, body) = self
            .post(
                "/api/subjects",
                Some(admin_token),
                json!({ "name": name, "code": code }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create subject failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }
}

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

pub fn admin_body(username: &str) -> Value {
    json!({
        "role": "Admin",
        "firstName": "Ada",
        "lastName": "Admin",
        "username": username,
        "password": "pass123"
    })
}

pub fn student_body(username: &str, student_id: &str) -> Value {
    json!({
        "role": "Student",
        "firstName": "Sam",
        "lastName": "Student",
        "username": username,
        "password": "pass123",
        "studentId": student_id,
        "year": 2,
        "course": "Computer Science"
    })
}

pub fn faculty_body(username: &str, faculty_id: &str) -> Value {
    json!({
        "role": "Faculty",
        "firstName": "Fay",
        "lastName": "Faculty",
        "username": username,
        "password": "pass123",
        "facultyId": faculty_id,
        "faculty": "Engineering"
    })
}
