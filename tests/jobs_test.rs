mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{anonymous_session, signed_in_session, StubBackend};
use resumatch::domain::{ApplicationStatus, Job};
use resumatch::JobBoard;

fn job() -> Job {
    serde_json::from_value(json!({
        "id": 4242,
        "name": "Compiler Engineer",
        "company": { "name": "Analytical Ltd" },
        "locations": [],
        "refs": { "landing_page": "https://jobs.example.com/4242" }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_refresh_loads_both_lists() {
    let stub = StubBackend::new();
    stub.respond("GET /jobs/saved", StatusCode::OK, json!([{ "id": 1, "name": "A" }]));
    stub.respond(
        "GET /applications",
        StatusCode::OK,
        json!([{ "id": 9, "jobId": "1", "status": "interviewing" }]),
    );
    let url = stub.spawn().await;
    let session = signed_in_session(&stub, &url).await;

    let board = JobBoard::new(session.clone());
    board.refresh().await;

    assert_eq!(board.saved_jobs().len(), 1);
    let apps = board.applications();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].status, ApplicationStatus::Interviewing);

    let order: Vec<String> = stub
        .requests()
        .into_iter()
        .map(|r| r.path)
        .filter(|path| path != "/users/me")
        .collect();
    assert_eq!(order, vec!["/jobs/saved", "/applications"]);

    session.logout();
    assert!(board.saved_jobs().is_empty());
    assert!(board.applications().is_empty());
}

#[tokio::test]
async fn test_refresh_keeps_previous_list_on_failure() {
    let stub = StubBackend::new();
    stub.respond("GET /jobs/saved", StatusCode::OK, json!([{ "id": 1 }]));
    stub.respond("GET /applications", StatusCode::OK, json!([]));
    let url = stub.spawn().await;
    let session = signed_in_session(&stub, &url).await;

    let board = JobBoard::new(session);
    board.refresh().await;
    stub.respond("GET /jobs/saved", StatusCode::INTERNAL_SERVER_ERROR, json!({}));
    board.refresh().await;

    assert_eq!(board.saved_jobs().len(), 1);
}

#[tokio::test]
async fn test_anonymous_refresh_makes_no_request() {
    let stub = StubBackend::new();
    let url = stub.spawn().await;
    let (session, _) = anonymous_session(&url);

    JobBoard::new(session).refresh().await;
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_save_and_unsave() {
    let stub = StubBackend::new();
    stub.respond("POST /jobs/4242/save", StatusCode::CREATED, json!({}));
    stub.respond("DELETE /jobs/4242/save", StatusCode::OK, json!({}));
    let url = stub.spawn().await;
    let session = signed_in_session(&stub, &url).await;

    let board = JobBoard::new(session);
    board.save_job(&job()).await.unwrap();
    assert_eq!(board.saved_jobs()[0].id, "4242");

    let body = stub.requests_to("POST /jobs/4242/save")[0].json.clone().unwrap();
    assert_eq!(body["refs"]["landing_page"], "https://jobs.example.com/4242");
    assert_eq!(body["id"], json!(4242));

    board.unsave_job("4242").await.unwrap();
    assert!(board.saved_jobs().is_empty());
}

#[tokio::test]
async fn test_apply_defaults_location_to_remote() {
    let stub = StubBackend::new();
    stub.respond(
        "POST /applications",
        StatusCode::CREATED,
        json!({ "id": 77, "jobId": "4242", "status": "Applied" }),
    );
    let url = stub.spawn().await;
    let session = signed_in_session(&stub, &url).await;

    let board = JobBoard::new(session);
    let application = board.apply(&job()).await.unwrap();
    assert_eq!(application.id, "77");
    assert_eq!(board.applications().len(), 1);

    let body = stub.requests_to("POST /applications")[0].json.clone().unwrap();
    assert_eq!(
        body,
        json!({
            "jobId": "4242",
            "jobTitle": "Compiler Engineer",
            "company": "Analytical Ltd",
            "location": "Remote",
            "status": "Applied"
        })
    );
}

#[tokio::test]
async fn test_status_filter_and_update() {
    let stub = StubBackend::new();
    stub.respond("GET /applications", StatusCode::OK, json!([]));
    stub.respond("PUT /applications/77", StatusCode::OK, json!({}));
    stub.respond("DELETE /applications/77", StatusCode::OK, json!({}));
    let url = stub.spawn().await;
    let session = signed_in_session(&stub, &url).await;

    let board = JobBoard::new(session);
    board
        .applications_with_status(Some(ApplicationStatus::Interviewing))
        .await
        .unwrap();
    let request = stub.requests_to("GET /applications").pop().unwrap();
    assert_eq!(request.query.as_deref(), Some("status=interviewing"));

    board
        .update_application_status("77", ApplicationStatus::Accepted)
        .await
        .unwrap();
    let body = stub.requests_to("PUT /applications/77")[0].json.clone().unwrap();
    assert_eq!(body, json!({ "status": "Accepted" }));

    board.delete_application("77").await.unwrap();
    assert_eq!(stub.requests_to("DELETE /applications/77").len(), 1);
}

#[tokio::test]
async fn test_job_status() {
    let stub = StubBackend::new();
    stub.respond("GET /jobs/4242/saved", StatusCode::OK, json!({ "isSaved": true }));
    stub.respond("GET /applications", StatusCode::OK, json!([]));
    let url = stub.spawn().await;
    let session = signed_in_session(&stub, &url).await;

    let status = JobBoard::new(session).job_status("4242").await.unwrap();
    assert!(status.is_saved);
    assert!(!status.has_applied);

    let request = stub.requests_to("GET /applications").pop().unwrap();
    assert_eq!(request.query.as_deref(), Some("jobId=4242"));
}
