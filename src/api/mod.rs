//! Resource query and mutation functions.
//!
//! Each endpoint has a raw `fetch_*` / write function that takes any
//! [`Transport`] and unwraps the envelope, plus an [`ApiClient`] method that
//! serves reads through the shared [`QueryClient`] and invalidates the
//! affected keys after a successful write.

pub mod jobs;
pub mod projects;
pub mod workers;

pub use jobs::{fetch_job, fetch_job_bids, fetch_jobs};
pub use projects::{
    fetch_project, fetch_project_messages, fetch_project_milestones, fetch_projects, post_message,
    put_milestone_status,
};
pub use workers::{fetch_worker, fetch_worker_portfolio, fetch_workers, search_workers};

use std::future::Future;
use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::info;

use crate::cache::{Query, QueryClient, QueryKey};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::mock::MockStore;
use crate::transport::{FixtureTransport, HttpTransport, Transport};

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    queries: QueryClient,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, queries: QueryClient) -> Self {
        Self { transport, queries }
    }

    /// Compose a client, choosing the fixture or HTTP transport from `config`.
    pub fn from_config(config: &ApiConfig) -> Self {
        let transport: Arc<dyn Transport> = if config.use_mock {
            info!("Using in-process mock API");
            Arc::new(FixtureTransport::new(MockStore::seeded()).with_latency(config.mock_latency))
        } else {
            info!(base_url = %config.base_url, "Using HTTP API");
            Arc::new(HttpTransport::new(config.base_url.clone()))
        };
        Self::new(transport, QueryClient::new(config.cache.clone()))
    }

    pub fn from_env() -> Self {
        Self::from_config(&ApiConfig::from_env())
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    async fn cached<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Query<T>
    where
        T: Send + Sync + 'static,
        F: Fn(Arc<dyn Transport>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        self.queries
            .query(key, move || fetch(Arc::clone(&transport)))
            .await
    }
}

/// Required ids must be non-empty before a query may run or a write be sent.
fn present(id: &str) -> Option<&str> {
    let id = id.trim();
    (!id.is_empty()).then_some(id)
}

/// Bytes that would change the route if an id carried them raw.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// An id as a single percent-encoded path segment.
fn segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

fn require<'a>(id: &'a str, what: &str) -> Result<&'a str, ApiError> {
    present(id).ok_or_else(|| ApiError::invalid(format!("{what} is required")))
}
