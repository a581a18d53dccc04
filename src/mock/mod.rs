//! In-process mock backend implementing the BuildBridge API contract against
//! fixture data. Served either in-process through `FixtureTransport` or over
//! HTTP by the `buildbridge` binary.

pub mod fixtures;
pub mod router;
pub mod store;

pub use router::{MockResponse, dispatch};
pub use store::{MessageBody, MilestoneStatusBody, MockStore, StoreError};
