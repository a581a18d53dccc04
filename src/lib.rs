pub mod api;
pub mod cache;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod mock;
pub mod models;
pub mod transport;

pub use api::ApiClient;
pub use cache::{Query, QueryClient, QueryKey, QueryState};
pub use config::{ApiConfig, CacheConfig};
pub use error::ApiError;
