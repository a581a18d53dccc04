use actix_web::{Responder, web};
use serde::Deserialize;

use super::{ok, reply};
use crate::mock::MockStore;
use crate::models::PaginationQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct SkillQuery {
    pub skill: Option<String>,
}

/// GET /api/workers?page&limit: paginated worker profiles.
pub async fn get_workers(
    store: web::Data<MockStore>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    ok(store.list_workers(&query).await)
}

/// GET /api/workers/search?skill=: case-insensitive substring match on skill names.
pub async fn search_workers(
    store: web::Data<MockStore>,
    query: web::Query<SkillQuery>,
) -> impl Responder {
    ok(store.search_workers(query.skill.as_deref()).await)
}

/// GET /api/workers/{id}
pub async fn get_worker(store: web::Data<MockStore>, path: web::Path<String>) -> impl Responder {
    reply(store.worker(&path).await)
}

/// GET /api/workers/{id}/portfolio
pub async fn get_portfolio(store: web::Data<MockStore>, path: web::Path<String>) -> impl Responder {
    ok(store.portfolio(&path).await)
}
