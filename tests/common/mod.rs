#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use buildbridge::transport::{ApiRequest, FixtureTransport, Transport};
use buildbridge::{ApiClient, ApiError, QueryClient};

/// Wraps a transport and records `"<METHOD> <path>"` for every call.
pub struct CountingTransport<T> {
    inner: T,
    calls: Mutex<Vec<String>>,
}

impl<T> CountingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn total(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }
}

#[async_trait]
impl<T: Transport> Transport for CountingTransport<T> {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.calls
            .lock()
            .push(format!("{} {}", request.method, request.path));
        self.inner.send(request).await
    }
}

/// Always answers with the same body.
pub struct StaticTransport(pub Value);

#[async_trait]
impl Transport for StaticTransport {
    async fn send(&self, _request: ApiRequest) -> Result<Value, ApiError> {
        Ok(self.0.clone())
    }
}

/// A client over freshly seeded fixtures, with its call log.
pub fn fixture_client(latency: Duration) -> (ApiClient, Arc<CountingTransport<FixtureTransport>>) {
    let transport = Arc::new(CountingTransport::new(
        FixtureTransport::seeded().with_latency(latency),
    ));
    let client = ApiClient::new(transport.clone(), QueryClient::default());
    (client, transport)
}
