use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::fixtures;
use crate::envelope::Envelope;
use crate::models::{
    Bid, JobListing, Message, Milestone, MilestoneStatus, PaginationQuery, PortfolioItem, Project,
    Worker,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
}

impl StoreError {
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::BadRequest(_) => 400,
        }
    }
}

// ── Request bodies as the backend receives them ──

/// Body of POST /projects/:id/messages. Fields default so validation can
/// answer with an envelope instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageBody {
    pub content: String,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_avatar: String,
}

/// Body of PUT /projects/:id/milestones/:milestoneId.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MilestoneStatusBody {
    pub status: String,
}

#[derive(Debug, Default)]
struct MockData {
    jobs: Vec<JobListing>,
    bids: Vec<Bid>,
    workers: Vec<Worker>,
    /// worker id -> portfolio items
    portfolios: HashMap<String, Vec<PortfolioItem>>,
    projects: Vec<Project>,
    milestones: Vec<Milestone>,
    messages: Vec<Message>,
}

impl MockData {
    fn project(&self, id: &str) -> Result<&Project, StoreError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound("Project"))
    }

    fn milestones_for(&self, project_id: &str) -> Vec<Milestone> {
        self.milestones
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect()
    }

    fn messages_for(&self, project_id: &str) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        messages
    }
}

fn page<T: Clone>(items: &[T], pagination: &PaginationQuery) -> Vec<T> {
    items[pagination.window(items.len())].to_vec()
}

/// In-memory backend serving the BuildBridge API contract from fixture data.
/// Clones share state.
#[derive(Clone, Default)]
pub struct MockStore {
    data: Arc<RwLock<MockData>>,
}

impl MockStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store loaded with the standard fixture set.
    pub fn seeded() -> Self {
        let data = MockData {
            jobs: fixtures::jobs(),
            bids: fixtures::bids(),
            workers: fixtures::workers(),
            portfolios: fixtures::portfolios(),
            projects: fixtures::projects(),
            milestones: fixtures::milestones(),
            messages: fixtures::messages(),
        };
        info!(
            jobs = data.jobs.len(),
            workers = data.workers.len(),
            projects = data.projects.len(),
            "Seeded mock store"
        );
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    pub async fn list_jobs(&self, pagination: &PaginationQuery) -> Vec<JobListing> {
        page(&self.data.read().await.jobs, pagination)
    }

    pub async fn job(&self, id: &str) -> Result<JobListing, StoreError> {
        self.data
            .read()
            .await
            .jobs
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("Job"))
    }

    pub async fn bids_for_job(&self, job_id: &str) -> Vec<Bid> {
        self.data
            .read()
            .await
            .bids
            .iter()
            .filter(|b| b.job_id == job_id)
            .cloned()
            .collect()
    }

    pub async fn list_workers(&self, pagination: &PaginationQuery) -> Vec<Worker> {
        page(&self.data.read().await.workers, pagination)
    }

    pub async fn worker(&self, id: &str) -> Result<Worker, StoreError> {
        self.data
            .read()
            .await
            .workers
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("Worker"))
    }

    /// Workers with a skill whose name contains `skill`, ignoring case.
    /// No filter returns every worker.
    pub async fn search_workers(&self, skill: Option<&str>) -> Vec<Worker> {
        let data = self.data.read().await;
        match skill.map(str::trim).filter(|s| !s.is_empty()) {
            Some(skill) => data
                .workers
                .iter()
                .filter(|w| w.has_skill_matching(skill))
                .cloned()
                .collect(),
            None => data.workers.clone(),
        }
    }

    pub async fn portfolio(&self, worker_id: &str) -> Vec<PortfolioItem> {
        self.data
            .read()
            .await
            .portfolios
            .get(worker_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Project summaries; milestones and messages are only embedded in the detail.
    pub async fn list_projects(&self, pagination: &PaginationQuery) -> Vec<Project> {
        page(&self.data.read().await.projects, pagination)
    }

    pub async fn project(&self, id: &str) -> Result<Project, StoreError> {
        let data = self.data.read().await;
        let mut project = data.project(id)?.clone();
        project.milestones = Some(data.milestones_for(id));
        project.messages = Some(data.messages_for(id));
        Ok(project)
    }

    pub async fn messages(&self, project_id: &str) -> Result<Vec<Message>, StoreError> {
        let data = self.data.read().await;
        data.project(project_id)?;
        Ok(data.messages_for(project_id))
    }

    pub async fn add_message(
        &self,
        project_id: &str,
        body: MessageBody,
    ) -> Result<Message, StoreError> {
        if body.content.trim().is_empty() {
            return Err(StoreError::BadRequest("Message content is required".to_string()));
        }

        let mut data = self.data.write().await;
        data.project(project_id)?;

        let message = Message {
            id: format!("msg-{}", Uuid::new_v4()),
            project_id: project_id.to_string(),
            sender_id: body.sender_id,
            sender_name: body.sender_name,
            sender_avatar: body.sender_avatar,
            content: body.content,
            timestamp: Utc::now(),
            is_own: true,
        };
        data.messages.push(message.clone());
        debug!(project_id, message_id = %message.id, "Stored message");
        Ok(message)
    }

    pub async fn milestones(&self, project_id: &str) -> Result<Vec<Milestone>, StoreError> {
        let data = self.data.read().await;
        data.project(project_id)?;
        Ok(data.milestones_for(project_id))
    }

    /// Set a milestone's status to pending, approved or rejected and stamp `updated_at`.
    pub async fn update_milestone(
        &self,
        project_id: &str,
        milestone_id: &str,
        body: MilestoneStatusBody,
    ) -> Result<Milestone, StoreError> {
        let status = body
            .status
            .parse::<MilestoneStatus>()
            .ok()
            .filter(MilestoneStatus::is_settable)
            .ok_or_else(|| StoreError::BadRequest("Invalid milestone status".to_string()))?;

        let mut data = self.data.write().await;
        let milestone = data
            .milestones
            .iter_mut()
            .find(|m| m.project_id == project_id && m.id == milestone_id)
            .ok_or(StoreError::NotFound("Milestone"))?;

        milestone.status = status;
        milestone.updated_at = Utc::now();
        debug!(project_id, milestone_id, %status, "Updated milestone");
        Ok(milestone.clone())
    }
}

/// Status code and envelope body for a store result.
pub fn envelope<T: Serialize>(result: Result<T, StoreError>, success_status: u16) -> (u16, serde_json::Value) {
    let (status, envelope) = match result {
        Ok(data) => (success_status, serde_json::to_value(Envelope::ok(data))),
        Err(e) => (e.status(), serde_json::to_value(Envelope::<()>::failure(e.to_string()))),
    };
    match envelope {
        Ok(body) => (status, body),
        Err(e) => (
            500,
            serde_json::json!({ "success": false, "error": format!("Failed to encode response: {e}") }),
        ),
    }
}
