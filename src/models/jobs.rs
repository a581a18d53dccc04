use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::workers::Skill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Open,
    InProgress,
    Closed,
    /// Any status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

/// A job posted by a builder or client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub company: String,
    pub location: String,
    pub required_skills: Vec<Skill>,
    #[serde(deserialize_with = "crate::models::deserialize_date")]
    pub posted_date: NaiveDate,
    #[serde(deserialize_with = "crate::models::deserialize_date")]
    pub deadline: NaiveDate,
    pub status: JobStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// A worker's bid on a job. `job_id` and `worker_id` are checked by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    pub job_id: String,
    pub worker_id: String,
    pub worker_name: String,
    pub worker_avatar: String,
    pub amount: f64,
    pub duration: String,
    pub proposal: String,
    pub created_at: DateTime<Utc>,
    pub status: BidStatus,
}
