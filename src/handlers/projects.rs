use actix_web::{Responder, web};

use super::{created, ok, reply};
use crate::mock::{MessageBody, MilestoneStatusBody, MockStore};
use crate::models::PaginationQuery;

/// GET /api/projects?page&limit: project summaries.
pub async fn get_projects(
    store: web::Data<MockStore>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    ok(store.list_projects(&query).await)
}

/// GET /api/projects/{id}: project with its milestones and messages embedded.
pub async fn get_project(store: web::Data<MockStore>, path: web::Path<String>) -> impl Responder {
    reply(store.project(&path).await)
}

/// GET /api/projects/{id}/messages: oldest first.
pub async fn get_messages(store: web::Data<MockStore>, path: web::Path<String>) -> impl Responder {
    reply(store.messages(&path).await)
}

/// POST /api/projects/{id}/messages: append a message (201 on success).
pub async fn add_message(
    store: web::Data<MockStore>,
    path: web::Path<String>,
    body: web::Json<MessageBody>,
) -> impl Responder {
    created(store.add_message(&path, body.into_inner()).await)
}

/// GET /api/projects/{id}/milestones
pub async fn get_milestones(store: web::Data<MockStore>, path: web::Path<String>) -> impl Responder {
    reply(store.milestones(&path).await)
}

/// PUT /api/projects/{id}/milestones/{milestone_id}: set status to
/// pending, approved or rejected.
pub async fn update_milestone(
    store: web::Data<MockStore>,
    path: web::Path<(String, String)>,
    body: web::Json<MilestoneStatusBody>,
) -> impl Responder {
    let (project_id, milestone_id) = path.into_inner();
    reply(
        store
            .update_milestone(&project_id, &milestone_id, body.into_inner())
            .await,
    )
}
