use std::fmt;

use crate::models::PaginationQuery;

/// Deterministic cache key: resource segments followed by parameter segments.
/// Rendered as `job:job-1:bids`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Segment-wise prefix test; `job:job-1` is a prefix of `job:job-1:bids`
    /// but not of `job:job-10`.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(":"))
    }
}

fn param(name: &str, value: Option<impl fmt::Display>) -> String {
    match value {
        Some(v) => format!("{name}={v}"),
        None => format!("{name}="),
    }
}

fn list(resource: &str, pagination: &PaginationQuery) -> QueryKey {
    QueryKey::new([
        resource.to_string(),
        "list".to_string(),
        param("page", pagination.page),
        param("limit", pagination.limit),
    ])
}

/// Key for job listings
pub fn jobs(pagination: &PaginationQuery) -> QueryKey {
    list("jobs", pagination)
}

/// Key for a single job
pub fn job(id: &str) -> QueryKey {
    QueryKey::new(["job", id])
}

/// Key for the bids on a job
pub fn job_bids(job_id: &str) -> QueryKey {
    job(job_id).child("bids")
}

pub fn workers(pagination: &PaginationQuery) -> QueryKey {
    list("workers", pagination)
}

pub fn worker_search(skill: &str) -> QueryKey {
    QueryKey::new(["workers".to_string(), "search".to_string(), param("skill", Some(skill))])
}

pub fn worker(id: &str) -> QueryKey {
    QueryKey::new(["worker", id])
}

pub fn worker_portfolio(worker_id: &str) -> QueryKey {
    worker(worker_id).child("portfolio")
}

pub fn projects(pagination: &PaginationQuery) -> QueryKey {
    list("projects", pagination)
}

pub fn project(id: &str) -> QueryKey {
    QueryKey::new(["project", id])
}

pub fn project_messages(project_id: &str) -> QueryKey {
    project(project_id).child("messages")
}

pub fn project_milestones(project_id: &str) -> QueryKey {
    project(project_id).child("milestones")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_parameters_give_identical_keys() {
        let a = jobs(&PaginationQuery::new(1, 10));
        let b = jobs(&PaginationQuery::new(1, 10));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "jobs:list:page=1:limit=10");
        assert_ne!(a, jobs(&PaginationQuery::new(2, 10)));
        assert_eq!(jobs(&PaginationQuery::default()).to_string(), "jobs:list:page=:limit=");
    }

    #[test]
    fn prefixes_match_whole_segments() {
        let bids = job_bids("job-1");
        assert!(bids.starts_with(&job("job-1")));
        assert!(!job_bids("job-10").starts_with(&job("job-1")));
        assert!(!project_messages("project-1").starts_with(&project_milestones("project-1")));
    }

    #[test]
    fn search_keys_include_the_filter() {
        assert_eq!(worker_search("react").to_string(), "workers:search:skill=react");
        assert_ne!(worker_search("react"), worker_search("React"));
    }
}
