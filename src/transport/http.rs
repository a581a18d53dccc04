use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiRequest, Method, Transport, failure_message};
use crate::error::ApiError;

/// Transport backed by a real HTTP server.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL + path, then the query parameters in request order.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| ApiError::request(format!("invalid URL {joined}: {e}")))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, &value.to_string());
            }
        }

        Ok(url)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, %url, "sending API request");

        let mut builder = self.client.request(reqwest_method(request.method), url.clone());
        if !request.has_header(CONTENT_TYPE.as_str()) {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            warn!(method = %request.method, %url, "API request failed: {e}");
            ApiError::request(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::request(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).ok();
            let message = failure_message(status.as_u16(), body.as_ref());
            warn!(method = %request.method, %url, status = status.as_u16(), "API request rejected: {message}");
            return Err(ApiError::Request(message));
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::request(format!("invalid JSON body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path_without_doubling_slashes() {
        let transport = HttpTransport::new("http://localhost:8080/api/");
        let url = transport
            .url_for(&ApiRequest::get("/jobs/job-1/bids"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/jobs/job-1/bids");
    }

    #[test]
    fn appends_query_in_request_order() {
        let transport = HttpTransport::new("http://localhost:8080/api");
        let request = ApiRequest::get("/workers/search")
            .query("skill", "react native")
            .query("limit", 5u32);
        let url = transport.url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/workers/search?skill=react+native&limit=5"
        );
    }

    #[test]
    fn encoded_segments_survive_url_parsing() {
        let transport = HttpTransport::new("http://localhost:8080/api");
        let url = transport
            .url_for(&ApiRequest::get("/jobs/job-1%2Fbids"))
            .unwrap();
        assert_eq!(url.path(), "/api/jobs/job-1%2Fbids");
    }

    #[test]
    fn relative_base_url_is_a_request_error() {
        let transport = HttpTransport::new("/api");
        let err = transport.url_for(&ApiRequest::get("/jobs")).unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
    }
}
