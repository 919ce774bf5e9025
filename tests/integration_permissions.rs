mod common;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use common::TestApp;

/// Every Admin-only mutation, attempted with a Student and a Faculty token.
#[tokio::test]
async fn test_non_admin_mutations_are_forbidden_and_change_nothing() {
    let app = TestApp::new();
    let (admin, _) = app.admin().await;
    let (student_token, student) = app.student().await;
    let (faculty_token, faculty) = app.faculty().await;
    let classroom = app.classroom(&admin, "Room101", 30).await;
    let subject = app.subject(&admin, "Calculus I", "MATH101").await;

    let classroom_uri = format!("/api/classrooms/{}", classroom);
    let subject_uri = format!("/api/subjects/{}", subject);

    let (_, classroom_before) = app.get(&classroom_uri, &admin).await;
    let (_, subject_before) = app.get(&subject_uri, &admin).await;
    let (_, accounts_before) = app.get("/api/accounts", &admin).await;

    let cases: Vec<(Method, String, Option<Value>)> = vec![
        (Method::POST, "/api/classrooms".into(), Some(json!({ "name": "Room102", "capacity": 5 }))),
        (Method::PUT, classroom_uri.clone(), Some(json!({ "name": "Renamed", "capacity": 1 }))),
        (Method::DELETE, classroom_uri.clone(), None),
        (
            Method::POST,
            format!("{}/students", classroom_uri),
            Some(json!({ "studentIds": [student["id"]] })),
        ),
        (Method::POST, "/api/subjects".into(), Some(json!({ "name": "Physics", "code": "PHY1" }))),
        (Method::PUT, subject_uri.clone(), Some(json!({ "code": "MATH999" }))),
        (Method::DELETE, subject_uri.clone(), None),
        (
            Method::POST,
            format!("{}/assign", subject_uri),
            Some(json!({ "classroomId": classroom, "facultyId": faculty["id"] })),
        ),
        (Method::GET, "/api/accounts".into(), None),
        (Method::DELETE, format!("/api/accounts/{}", student["id"].as_str().unwrap()), None),
    ];

    for token in [&student_token, &faculty_token] {
        for (method, uri, body) in &cases {
            let (status, response) = app
                .request(method.clone(), uri, Some(token), body.clone())
                .await;

            assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
            assert_eq!(
                response["message"], "Access denied. Admin only.",
                "{} {}",
                method, uri
            );
        }
    }

    let (_, classroom_after) = app.get(&classroom_uri, &admin).await;
    let (_, subject_after) = app.get(&subject_uri, &admin).await;
    let (_, accounts_after) = app.get("/api/accounts", &admin).await;
    let (_, classrooms) = app.get("/api/classrooms", &admin).await;
    let (_, subjects) = app.get("/api/subjects", &admin).await;

    assert_eq!(classroom_after, classroom_before);
    assert_eq!(subject_after, subject_before);
    assert_eq!(accounts_after, accounts_before);
    assert_eq!(classrooms.as_array().unwrap().len(), 1);
    assert_eq!(subjects.as_array().unwrap().len(), 1);
}
