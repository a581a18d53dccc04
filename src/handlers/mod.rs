pub mod jobs;
pub mod projects;
pub mod workers;

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::envelope::Envelope;
use crate::mock::StoreError;
use crate::mock::store::envelope;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config());

    // ── Job routes ──
    cfg.service(
        web::scope("/jobs")
            .route("", web::get().to(jobs::get_jobs))
            .route("/{id}", web::get().to(jobs::get_job))
            .route("/{id}/bids", web::get().to(jobs::get_job_bids)),
    );

    // ── Worker routes (search is registered before the id route) ──
    cfg.service(
        web::scope("/workers")
            .route("", web::get().to(workers::get_workers))
            .route("/search", web::get().to(workers::search_workers))
            .route("/{id}", web::get().to(workers::get_worker))
            .route("/{id}/portfolio", web::get().to(workers::get_portfolio)),
    );

    // ── Project workspace routes ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}/messages", web::get().to(projects::get_messages))
            .route("/{id}/messages", web::post().to(projects::add_message))
            .route("/{id}/milestones", web::get().to(projects::get_milestones))
            .route(
                "/{id}/milestones/{milestone_id}",
                web::put().to(projects::update_milestone),
            ),
    );
}

/// Malformed JSON bodies still answer with an envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = Envelope::<()>::failure(format!("Invalid request body: {err}"));
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let body = Envelope::<()>::failure(format!("Invalid query string: {err}"));
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn respond((status, body): (u16, serde_json::Value)) -> HttpResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(body)
}

fn ok<T: Serialize>(data: T) -> HttpResponse {
    respond(envelope(Ok::<_, StoreError>(data), 200))
}

fn reply<T: Serialize>(result: Result<T, StoreError>) -> HttpResponse {
    respond(envelope(result, 200))
}

fn created<T: Serialize>(result: Result<T, StoreError>) -> HttpResponse {
    respond(envelope(result, 201))
}
