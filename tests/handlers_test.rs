//! Integration tests for the mock API server routes.
//!
//! The app is built in-process with `actix_web::test`; no port is bound.
//!
//! Run with: `cargo test --test handlers_test`
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use buildbridge::handlers;
use buildbridge::mock::MockStore;

macro_rules! mock_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(MockStore::seeded()))
                .service(web::scope("/api").configure(handlers::init_routes)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_jobs_are_paginated() {
    let app = mock_app!();

    let req = test::TestRequest::get().uri("/api/jobs?page=1&limit=10").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let req = test::TestRequest::get().uri("/api/jobs?page=2&limit=10").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn test_unknown_job_is_404_envelope() {
    let app = mock_app!();

    let req = test::TestRequest::get().uri("/api/jobs/does-not-exist").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "error": "Job not found" }));
}

#[actix_web::test]
async fn test_search_route_is_not_shadowed_by_worker_id() {
    let app = mock_app!();

    let req = test::TestRequest::get().uri("/api/workers/search?skill=react").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["worker-1", "worker-3"]);
}

#[actix_web::test]
async fn test_milestone_update_then_read() {
    let app = mock_app!();

    let req = test::TestRequest::put()
        .uri("/api/projects/project-1/milestones/milestone-3")
        .set_json(json!({ "status": "approved" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "approved");

    let req = test::TestRequest::get()
        .uri("/api/projects/project-1/milestones")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let stored = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == "milestone-3")
        .cloned()
        .unwrap();
    assert_eq!(stored["status"], "approved");
}

#[actix_web::test]
async fn test_invalid_milestone_status_is_400() {
    let app = mock_app!();

    let req = test::TestRequest::put()
        .uri("/api/projects/project-1/milestones/milestone-3")
        .set_json(json!({ "status": "done" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid milestone status");
}

#[actix_web::test]
async fn test_post_message_is_created() {
    let app = mock_app!();

    let req = test::TestRequest::post()
        .uri("/api/projects/project-1/messages")
        .set_json(json!({
            "content": "Plasterer booked for Monday.",
            "senderId": "user-1",
            "senderName": "Grace Lin",
            "senderAvatar": "/avatars/grace.png"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["projectId"], "project-1");
    assert_eq!(body["data"]["isOwn"], true);

    let req = test::TestRequest::get()
        .uri("/api/projects/project-1/messages")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_empty_message_is_400() {
    let app = mock_app!();

    let req = test::TestRequest::post()
        .uri("/api/projects/project-1/messages")
        .set_json(json!({ "content": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Message content is required");
}

#[actix_web::test]
async fn test_malformed_json_is_400_envelope() {
    let app = mock_app!();

    let req = test::TestRequest::post()
        .uri("/api/projects/project-1/messages")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[actix_web::test]
async fn test_project_detail_embeds_workspace() {
    let app = mock_app!();

    let req = test::TestRequest::get().uri("/api/projects/project-1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["milestones"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["messages"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/projects/nope/messages").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unparsable_pagination_is_400_envelope() {
    let app = mock_app!();

    let req = test::TestRequest::get().uri("/api/jobs?page=two").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query string"));
}
