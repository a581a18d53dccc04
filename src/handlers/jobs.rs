use actix_web::{Responder, web};

use super::{ok, reply};
use crate::mock::MockStore;
use crate::models::PaginationQuery;

/// GET /api/jobs?page&limit: paginated job listings.
pub async fn get_jobs(
    store: web::Data<MockStore>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    ok(store.list_jobs(&query).await)
}

/// GET /api/jobs/{id}: a single job, 404 when unknown.
pub async fn get_job(store: web::Data<MockStore>, path: web::Path<String>) -> impl Responder {
    reply(store.job(&path).await)
}

/// GET /api/jobs/{id}/bids: bids placed on a job.
pub async fn get_job_bids(store: web::Data<MockStore>, path: web::Path<String>) -> impl Responder {
    ok(store.bids_for_job(&path).await)
}
