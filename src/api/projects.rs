use tracing::debug;

use super::{ApiClient, present, require, segment};
use crate::cache::{Query, QueryKey, keys};
use crate::envelope;
use crate::error::ApiError;
use crate::models::{
    Message, Milestone, MilestoneStatus, NewMessage, PaginationQuery, Project,
    UpdateMilestoneStatus,
};
use crate::transport::{ApiRequest, Transport};

/// GET /projects?page&limit
pub async fn fetch_projects(
    transport: &dyn Transport,
    pagination: &PaginationQuery,
) -> Result<Vec<Project>, ApiError> {
    let request = ApiRequest::get("/projects")
        .query_opt("page", pagination.page)
        .query_opt("limit", pagination.limit);
    envelope::parse::<Vec<Project>>(transport.send(request).await?)?
        .into_list("Failed to fetch projects")
}

/// GET /projects/:id
pub async fn fetch_project(transport: &dyn Transport, id: &str) -> Result<Option<Project>, ApiError> {
    let request = ApiRequest::get(format!("/projects/{}", segment(id)));
    envelope::parse::<Project>(transport.send(request).await?)?
        .into_optional("Failed to fetch project")
}

/// GET /projects/:id/messages
pub async fn fetch_project_messages(
    transport: &dyn Transport,
    project_id: &str,
) -> Result<Vec<Message>, ApiError> {
    let request = ApiRequest::get(format!("/projects/{}/messages", segment(project_id)));
    envelope::parse::<Vec<Message>>(transport.send(request).await?)?
        .into_list("Failed to fetch messages")
}

/// GET /projects/:id/milestones
pub async fn fetch_project_milestones(
    transport: &dyn Transport,
    project_id: &str,
) -> Result<Vec<Milestone>, ApiError> {
    let request = ApiRequest::get(format!("/projects/{}/milestones", segment(project_id)));
    envelope::parse::<Vec<Milestone>>(transport.send(request).await?)?
        .into_list("Failed to fetch milestones")
}

/// POST /projects/:id/messages
///
/// Rejects an empty project id or empty content without sending anything.
pub async fn post_message(
    transport: &dyn Transport,
    project_id: &str,
    message: &NewMessage,
) -> Result<Message, ApiError> {
    let project_id = require(project_id, "project id")?;
    if message.content.trim().is_empty() {
        return Err(ApiError::invalid("message content is required"));
    }

    let path = format!("/projects/{}/messages", segment(project_id));
    let request = ApiRequest::post(path).json(message)?;
    envelope::parse::<Message>(transport.send(request).await?)?.into_data("Failed to send message")
}

/// PUT /projects/:id/milestones/:milestoneId
///
/// Only `pending`, `approved` and `rejected` may be set; anything else is
/// rejected before a request is made.
pub async fn put_milestone_status(
    transport: &dyn Transport,
    project_id: &str,
    milestone_id: &str,
    status: MilestoneStatus,
) -> Result<Milestone, ApiError> {
    let project_id = require(project_id, "project id")?;
    let milestone_id = require(milestone_id, "milestone id")?;
    if !status.is_settable() {
        return Err(ApiError::invalid(format!(
            "milestone status '{status}' cannot be set directly"
        )));
    }

    let path = format!(
        "/projects/{}/milestones/{}",
        segment(project_id),
        segment(milestone_id)
    );
    let request = ApiRequest::put(path)
        .json(&UpdateMilestoneStatus { status })?;
    envelope::parse::<Milestone>(transport.send(request).await?)?
        .into_data("Failed to update milestone")
}

impl ApiClient {
    pub async fn projects(&self, pagination: PaginationQuery) -> Query<Vec<Project>> {
        let key = keys::projects(&pagination);
        self.cached(key, move |transport| {
            let pagination = pagination.clone();
            async move { fetch_projects(transport.as_ref(), &pagination).await }
        })
        .await
    }

    /// Disabled while `id` is empty.
    pub async fn project(&self, id: &str) -> Query<Option<Project>> {
        let Some(id) = present(id).map(str::to_string) else {
            return Query::disabled();
        };
        self.cached(keys::project(&id), move |transport| {
            let id = id.clone();
            async move { fetch_project(transport.as_ref(), &id).await }
        })
        .await
    }

    /// Disabled while `project_id` is empty.
    pub async fn project_messages(&self, project_id: &str) -> Query<Vec<Message>> {
        let Some(project_id) = present(project_id).map(str::to_string) else {
            return Query::disabled();
        };
        self.cached(keys::project_messages(&project_id), move |transport| {
            let project_id = project_id.clone();
            async move { fetch_project_messages(transport.as_ref(), &project_id).await }
        })
        .await
    }

    /// Disabled while `project_id` is empty.
    pub async fn project_milestones(&self, project_id: &str) -> Query<Vec<Milestone>> {
        let Some(project_id) = present(project_id).map(str::to_string) else {
            return Query::disabled();
        };
        self.cached(keys::project_milestones(&project_id), move |transport| {
            let project_id = project_id.clone();
            async move { fetch_project_milestones(transport.as_ref(), &project_id).await }
        })
        .await
    }

    /// Append a message, then refresh the project's message list.
    ///
    /// On failure the error is returned and the cache is left untouched.
    pub async fn add_message(
        &self,
        project_id: &str,
        message: NewMessage,
    ) -> Result<Message, ApiError> {
        let created = post_message(self.transport.as_ref(), project_id, &message).await?;
        self.after_project_write(project_id.trim(), keys::project_messages(project_id.trim()))
            .await;
        Ok(created)
    }

    /// Set a milestone's status, then refresh the project's milestone list.
    ///
    /// On failure the error is returned and the cache is left untouched.
    pub async fn update_milestone_status(
        &self,
        project_id: &str,
        milestone_id: &str,
        status: MilestoneStatus,
    ) -> Result<Milestone, ApiError> {
        let updated =
            put_milestone_status(self.transport.as_ref(), project_id, milestone_id, status).await?;
        self.after_project_write(project_id.trim(), keys::project_milestones(project_id.trim()))
            .await;
        Ok(updated)
    }

    /// The affected list plus the project detail, which embeds both lists.
    async fn after_project_write(&self, project_id: &str, affected: QueryKey) {
        let lists = self.queries.invalidate_prefix(&affected).await;
        let detail = self.queries.invalidate_exact(&keys::project(project_id)).await;
        debug!(project_id, lists, detail, "refreshed project queries after write");
    }
}
