use super::{ApiClient, present, segment};
use crate::cache::{Query, keys};
use crate::envelope;
use crate::error::ApiError;
use crate::models::{Bid, JobListing, PaginationQuery};
use crate::transport::{ApiRequest, Transport};

/// GET /jobs?page&limit
pub async fn fetch_jobs(
    transport: &dyn Transport,
    pagination: &PaginationQuery,
) -> Result<Vec<JobListing>, ApiError> {
    let request = ApiRequest::get("/jobs")
        .query_opt("page", pagination.page)
        .query_opt("limit", pagination.limit);
    envelope::parse::<Vec<JobListing>>(transport.send(request).await?)?
        .into_list("Failed to fetch jobs")
}

/// GET /jobs/:id
pub async fn fetch_job(transport: &dyn Transport, id: &str) -> Result<Option<JobListing>, ApiError> {
    let request = ApiRequest::get(format!("/jobs/{}", segment(id)));
    envelope::parse::<JobListing>(transport.send(request).await?)?
        .into_optional("Failed to fetch job")
}

/// GET /jobs/:id/bids
pub async fn fetch_job_bids(transport: &dyn Transport, job_id: &str) -> Result<Vec<Bid>, ApiError> {
    let request = ApiRequest::get(format!("/jobs/{}/bids", segment(job_id)));
    envelope::parse::<Vec<Bid>>(transport.send(request).await?)?
        .into_list("Failed to fetch bids")
}

impl ApiClient {
    pub async fn jobs(&self, pagination: PaginationQuery) -> Query<Vec<JobListing>> {
        let key = keys::jobs(&pagination);
        self.cached(key, move |transport| {
            let pagination = pagination.clone();
            async move { fetch_jobs(transport.as_ref(), &pagination).await }
        })
        .await
    }

    /// Disabled while `id` is empty.
    pub async fn job(&self, id: &str) -> Query<Option<JobListing>> {
        let Some(id) = present(id).map(str::to_string) else {
            return Query::disabled();
        };
        self.cached(keys::job(&id), move |transport| {
            let id = id.clone();
            async move { fetch_job(transport.as_ref(), &id).await }
        })
        .await
    }

    /// Disabled while `job_id` is empty.
    pub async fn job_bids(&self, job_id: &str) -> Query<Vec<Bid>> {
        let Some(job_id) = present(job_id).map(str::to_string) else {
            return Query::disabled();
        };
        self.cached(keys::job_bids(&job_id), move |transport| {
            let job_id = job_id.clone();
            async move { fetch_job_bids(transport.as_ref(), &job_id).await }
        })
        .await
    }
}
