use super::{ApiClient, present, segment};
use crate::cache::{Query, keys};
use crate::envelope;
use crate::error::ApiError;
use crate::models::{PaginationQuery, PortfolioItem, Worker};
use crate::transport::{ApiRequest, Transport};

/// GET /workers?page&limit
pub async fn fetch_workers(
    transport: &dyn Transport,
    pagination: &PaginationQuery,
) -> Result<Vec<Worker>, ApiError> {
    let request = ApiRequest::get("/workers")
        .query_opt("page", pagination.page)
        .query_opt("limit", pagination.limit);
    envelope::parse::<Vec<Worker>>(transport.send(request).await?)?
        .into_list("Failed to fetch workers")
}

/// GET /workers/:id
pub async fn fetch_worker(transport: &dyn Transport, id: &str) -> Result<Option<Worker>, ApiError> {
    let request = ApiRequest::get(format!("/workers/{}", segment(id)));
    envelope::parse::<Worker>(transport.send(request).await?)?
        .into_optional("Failed to fetch worker")
}

/// GET /workers/search?skill=. An empty filter is sent without the parameter.
pub async fn search_workers(transport: &dyn Transport, skill: &str) -> Result<Vec<Worker>, ApiError> {
    let skill = skill.trim();
    let request =
        ApiRequest::get("/workers/search").query_opt("skill", (!skill.is_empty()).then_some(skill));
    envelope::parse::<Vec<Worker>>(transport.send(request).await?)?
        .into_list("Failed to search workers")
}

/// GET /workers/:id/portfolio
pub async fn fetch_worker_portfolio(
    transport: &dyn Transport,
    worker_id: &str,
) -> Result<Vec<PortfolioItem>, ApiError> {
    let request = ApiRequest::get(format!("/workers/{}/portfolio", segment(worker_id)));
    envelope::parse::<Vec<PortfolioItem>>(transport.send(request).await?)?
        .into_list("Failed to fetch portfolio")
}

impl ApiClient {
    pub async fn workers(&self, pagination: PaginationQuery) -> Query<Vec<Worker>> {
        let key = keys::workers(&pagination);
        self.cached(key, move |transport| {
            let pagination = pagination.clone();
            async move { fetch_workers(transport.as_ref(), &pagination).await }
        })
        .await
    }

    /// Disabled while `id` is empty.
    pub async fn worker(&self, id: &str) -> Query<Option<Worker>> {
        let Some(id) = present(id).map(str::to_string) else {
            return Query::disabled();
        };
        self.cached(keys::worker(&id), move |transport| {
            let id = id.clone();
            async move { fetch_worker(transport.as_ref(), &id).await }
        })
        .await
    }

    pub async fn search_workers(&self, skill: &str) -> Query<Vec<Worker>> {
        let skill = skill.trim().to_string();
        self.cached(keys::worker_search(&skill), move |transport| {
            let skill = skill.clone();
            async move { search_workers(transport.as_ref(), &skill).await }
        })
        .await
    }

    /// Disabled while `worker_id` is empty.
    pub async fn worker_portfolio(&self, worker_id: &str) -> Query<Vec<PortfolioItem>> {
        let Some(worker_id) = present(worker_id).map(str::to_string) else {
            return Query::disabled();
        };
        self.cached(keys::worker_portfolio(&worker_id), move |transport| {
            let worker_id = worker_id.clone();
            async move { fetch_worker_portfolio(transport.as_ref(), &worker_id).await }
        })
        .await
    }
}
