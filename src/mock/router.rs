use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::store::{MockStore, StoreError, envelope};
use crate::models::PaginationQuery;
use crate::transport::{ApiRequest, Method};

/// What the mock backend would have put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: u16,
    pub body: Value,
}

impl MockResponse {
    fn from_parts((status, body): (u16, Value)) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn ok<T: serde::Serialize>(data: T) -> MockResponse {
    MockResponse::from_parts(envelope(Ok(data), 200))
}

fn reply<T: serde::Serialize>(result: Result<T, StoreError>) -> MockResponse {
    MockResponse::from_parts(envelope(result, 200))
}

fn created<T: serde::Serialize>(result: Result<T, StoreError>) -> MockResponse {
    MockResponse::from_parts(envelope(result, 201))
}

/// `page` and `limit` are optional, but a value that is present must be a
/// non-negative integer, as the HTTP handlers require.
fn pagination(request: &ApiRequest) -> Result<PaginationQuery, StoreError> {
    let param = |name: &str| {
        request
            .query_value(name)
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| StoreError::BadRequest(format!("Invalid query string: {name}: {e}")))
    };
    Ok(PaginationQuery {
        page: param("page")?,
        limit: param("limit")?,
    })
}

fn body<T: DeserializeOwned + Default>(request: &ApiRequest) -> Result<T, StoreError> {
    match &request.body {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| StoreError::BadRequest(format!("Invalid request body: {e}"))),
        None => Ok(T::default()),
    }
}

/// Route one request against the store, the same way the HTTP handlers do.
pub async fn dispatch(store: &MockStore, request: &ApiRequest) -> MockResponse {
    let decoded: Vec<String> = request
        .path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect();
    let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

    let response = match (request.method, segments.as_slice()) {
        (Method::Get, ["jobs"]) => match pagination(request) {
            Ok(page) => ok(store.list_jobs(&page).await),
            Err(e) => reply::<()>(Err(e)),
        },
        (Method::Get, ["jobs", id]) => reply(store.job(id).await),
        (Method::Get, ["jobs", id, "bids"]) => ok(store.bids_for_job(id).await),

        (Method::Get, ["workers"]) => match pagination(request) {
            Ok(page) => ok(store.list_workers(&page).await),
            Err(e) => reply::<()>(Err(e)),
        },
        (Method::Get, ["workers", "search"]) => {
            let skill = request.query_value("skill");
            ok(store.search_workers(skill.as_deref()).await)
        }
        (Method::Get, ["workers", id]) => reply(store.worker(id).await),
        (Method::Get, ["workers", id, "portfolio"]) => ok(store.portfolio(id).await),

        (Method::Get, ["projects"]) => match pagination(request) {
            Ok(page) => ok(store.list_projects(&page).await),
            Err(e) => reply::<()>(Err(e)),
        },
        (Method::Get, ["projects", id]) => reply(store.project(id).await),
        (Method::Get, ["projects", id, "messages"]) => reply(store.messages(id).await),
        (Method::Post, ["projects", id, "messages"]) => match body(request) {
            Ok(message) => created(store.add_message(id, message).await),
            Err(e) => reply::<()>(Err(e)),
        },
        (Method::Get, ["projects", id, "milestones"]) => reply(store.milestones(id).await),
        (Method::Put, ["projects", id, "milestones", milestone_id]) => match body(request) {
            Ok(update) => reply(store.update_milestone(id, milestone_id, update).await),
            Err(e) => reply::<()>(Err(e)),
        },

        _ => MockResponse {
            status: 404,
            body: serde_json::json!({
                "success": false,
                "error": format!("No mock handler for {} {}", request.method, request.path),
            }),
        },
    };

    debug!(
        method = %request.method,
        path = %request.path,
        status = response.status,
        "Mock API handled request"
    );
    response
}
