//! Integration tests for the HTTP transport against a local mock server.
//!
//! Run with: `cargo test --test http_transport_test`
use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use buildbridge::api::{fetch_job, fetch_jobs, put_milestone_status, search_workers};
use buildbridge::models::{MilestoneStatus, PaginationQuery};
use buildbridge::transport::{ApiRequest, HttpTransport, Transport};
use buildbridge::{ApiClient, ApiError, QueryClient};

fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(format!("{}/api", server.base_url()))
}

fn job_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Loft conversion",
        "description": "Dormer loft conversion with ensuite.",
        "budget": 42000.0,
        "company": "Harbour Homes",
        "location": "Bristol",
        "requiredSkills": [],
        "postedDate": "2024-03-01",
        "deadline": "2024-05-01",
        "status": "open"
    })
}

#[tokio::test]
async fn test_sends_path_query_and_json_content_type() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/jobs")
                .query_param("page", "2")
                .query_param("limit", "5")
                .header("content-type", "application/json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "success": true, "data": [job_json("job-9")] }));
        })
        .await;

    let jobs = fetch_jobs(&transport_for(&server), &PaginationQuery::new(2, 5))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "job-9");
}

#[tokio::test]
async fn test_skill_filter_is_sent_as_query_parameter() {
    let server = MockServer::start_async().await;
    let filtered = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/workers/search")
                .query_param("skill", "react native");
            then.status(200).json_body(json!({ "success": true, "data": [] }));
        })
        .await;

    let transport = transport_for(&server);
    assert!(search_workers(&transport, " react native ").await.unwrap().is_empty());
    assert_eq!(filtered.hits_async().await, 1);
}

#[test]
fn test_empty_skill_filter_builds_bare_url() {
    let transport = HttpTransport::new("http://localhost:8080/api");
    let url = transport
        .url_for(&ApiRequest::get("/workers/search").query_opt::<&str>("skill", None))
        .unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/api/workers/search");
}

#[tokio::test]
async fn test_put_sends_status_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/projects/project-1/milestones/milestone-3")
                .json_body(json!({ "status": "approved" }));
            then.status(200).json_body(json!({
                "success": true,
                "data": {
                    "id": "milestone-3",
                    "projectId": "project-1",
                    "title": "Second fix electrics",
                    "description": "Sockets, switches and lighting.",
                    "dueDate": "2024-06-01",
                    "status": "approved",
                    "progress": 100,
                    "createdAt": "2024-03-01T09:00:00Z",
                    "updatedAt": "2024-05-20T16:30:00Z"
                }
            }));
        })
        .await;

    let milestone = put_milestone_status(
        &transport_for(&server),
        "project-1",
        "milestone-3",
        MilestoneStatus::Approved,
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert_eq!(milestone.status, MilestoneStatus::Approved);
}

#[tokio::test]
async fn test_failure_message_prefers_message_field() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/jobs/job-1");
            then.status(422)
                .json_body(json!({ "success": false, "error": "Unprocessable", "message": "Job is archived" }));
        })
        .await;

    let err = fetch_job(&transport_for(&server), "job-1").await.unwrap_err();
    assert_eq!(err, ApiError::Request("Job is archived".to_string()));
}

#[tokio::test]
async fn test_failure_message_falls_back_to_envelope_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/jobs/missing");
            then.status(404)
                .json_body(json!({ "success": false, "error": "Job not found" }));
        })
        .await;

    let err = fetch_job(&transport_for(&server), "missing").await.unwrap_err();
    assert_eq!(err.to_string(), "API Request Failed: Job not found");
}

#[tokio::test]
async fn test_failure_message_falls_back_to_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/jobs/job-1");
            then.status(503).body("upstream unavailable");
        })
        .await;

    let err = fetch_job(&transport_for(&server), "job-1").await.unwrap_err();
    assert_eq!(err, ApiError::Request("HTTP 503".to_string()));
}

#[tokio::test]
async fn test_invalid_json_body_is_a_request_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/jobs");
            then.status(200)
                .header("content-type", "application/json")
                .body("not valid json");
        })
        .await;

    let err = transport_for(&server)
        .send(ApiRequest::get("/jobs"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}

#[tokio::test]
async fn test_connection_refused_is_a_request_error() {
    // Nothing listens on port 1.
    let transport = HttpTransport::new("http://127.0.0.1:1/api");
    let err = transport.send(ApiRequest::get("/jobs")).await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
    assert!(err.to_string().starts_with("API Request Failed: "));
}

#[tokio::test]
async fn test_cached_client_shares_one_http_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/jobs/job-1");
            then.status(200)
                .delay(Duration::from_millis(50))
                .json_body(json!({ "success": true, "data": job_json("job-1") }));
        })
        .await;

    let api = ApiClient::new(Arc::new(transport_for(&server)), QueryClient::default());
    let (mut first, mut second) = tokio::join!(api.job("job-1"), api.job("job-1"));
    let a = first.settled().await.data().unwrap();
    let b = second.settled().await.data().unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(mock.hits_async().await, 1);
}
