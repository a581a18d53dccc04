use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiRequest, Transport, failure_message};
use crate::error::ApiError;
use crate::mock::{MockStore, dispatch};

/// Transport answering from the in-process mock store, with the same non-2xx
/// normalization as [`super::HttpTransport`].
#[derive(Clone)]
pub struct FixtureTransport {
    store: MockStore,
    latency: Duration,
}

impl FixtureTransport {
    pub fn new(store: MockStore) -> Self {
        Self {
            store,
            latency: Duration::ZERO,
        }
    }

    pub fn seeded() -> Self {
        Self::new(MockStore::seeded())
    }

    /// Delay every response, like a network round-trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn store(&self) -> &MockStore {
        &self.store
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        debug!(method = %request.method, path = %request.path, "serving API request from fixtures");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let response = dispatch(&self.store, &request).await;
        if !response.is_success() {
            let message = failure_message(response.status, Some(&response.body));
            warn!(method = %request.method, path = %request.path, status = response.status, "API request rejected: {message}");
            return Err(ApiError::Request(message));
        }
        Ok(response.body)
    }
}
