//! Shared query cache.
//!
//! Each [`QueryKey`] maps to one entry holding the latest state, the fetch
//! that produces it, and at most one live in-flight request. Consumers hold
//! [`Query`] handles; an entry with live handles is "observed" and is refetched
//! as soon as it is invalidated. Unobserved entries are only marked stale and
//! refetch on their next observation.
//!
//! Entry state moves `NotRequested -> Loading -> Success | Failure`, and back
//! to `Loading` on refetch or invalidation. Only the most recently issued
//! request for a key may write its entry: a response that was superseded by a
//! later refetch or invalidation is dropped when it arrives.

pub mod keys;
mod query;

pub use keys::QueryKey;
pub use query::{Query, QueryState};

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::{BoxFuture, FutureExt, Shared, join_all};
use moka::future::Cache;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::CacheConfig;
use crate::error::ApiError;
use query::Erased;

type FetchResult = Result<Arc<Erased>, ApiError>;
type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, FetchResult> + Send + Sync>;
type InFlight = Shared<BoxFuture<'static, FetchResult>>;

#[derive(Default)]
struct EntryInner {
    fetcher: Option<Fetcher>,
    /// Sequence number and handle of the request allowed to settle this entry.
    in_flight: Option<(u64, InFlight)>,
    issued: u64,
    fetched_at: Option<Instant>,
    stale: bool,
}

pub(crate) struct QueryEntry {
    key: QueryKey,
    state: watch::Sender<QueryState<Erased>>,
    inner: Mutex<EntryInner>,
}

impl QueryEntry {
    fn new(key: QueryKey) -> Self {
        let (state, _) = watch::channel(QueryState::NotRequested);
        Self {
            key,
            state,
            inner: Mutex::new(EntryInner::default()),
        }
    }

    pub(crate) fn key(&self) -> &QueryKey {
        &self.key
    }

    fn observe(&self) -> watch::Receiver<QueryState<Erased>> {
        self.state.subscribe()
    }

    fn is_observed(&self) -> bool {
        self.state.receiver_count() > 0
    }

    /// Install the fetcher and start a request unless the current state can
    /// be served: a fresh success, a failure, or a request already in flight.
    fn ensure(self: &Arc<Self>, fetcher: Fetcher, stale_time: Option<Duration>) {
        let mut inner = self.inner.lock();
        inner.fetcher = Some(fetcher);

        if inner.in_flight.is_some() && !inner.stale {
            debug!(key = %self.key, "joining in-flight request");
            return;
        }

        let current = self.state.borrow().clone();
        let needs_fetch = match current {
            QueryState::NotRequested | QueryState::Loading => true,
            QueryState::Failure(_) => inner.stale,
            QueryState::Success(_) => {
                inner.stale
                    || stale_time.is_some_and(|window| {
                        inner.fetched_at.is_none_or(|at| at.elapsed() >= window)
                    })
            }
        };

        if needs_fetch {
            self.start(&mut inner);
        } else {
            debug!(key = %self.key, "serving cached state");
        }
    }

    /// Start a new request, superseding any in flight.
    pub(crate) fn force(self: &Arc<Self>) -> Option<InFlight> {
        let mut inner = self.inner.lock();
        self.start(&mut inner)
    }

    /// Observed entries refetch immediately; others are only marked stale.
    fn invalidate(self: &Arc<Self>) -> Option<InFlight> {
        let mut inner = self.inner.lock();
        if self.is_observed() {
            self.start(&mut inner)
        } else {
            inner.stale = true;
            None
        }
    }

    fn start(self: &Arc<Self>, inner: &mut EntryInner) -> Option<InFlight> {
        let fetcher = inner.fetcher.clone()?;
        inner.issued += 1;
        let seq = inner.issued;
        debug!(key = %self.key, seq, "fetching");

        let entry = Arc::clone(self);
        let request = fetcher();
        let in_flight = async move {
            let result = request.await;
            entry.settle(seq, &result);
            result
        }
        .boxed()
        .shared();

        inner.in_flight = Some((seq, in_flight.clone()));
        inner.stale = false;
        self.state.send_replace(QueryState::Loading);

        // Driven independently so the entry settles even if every waiter goes away.
        tokio::spawn(in_flight.clone());
        Some(in_flight)
    }

    fn settle(&self, seq: u64, result: &FetchResult) {
        let mut inner = self.inner.lock();
        if inner.in_flight.as_ref().map(|(current, _)| *current) != Some(seq) {
            debug!(key = %self.key, seq, "discarding superseded response");
            return;
        }
        inner.in_flight = None;

        let next = match result {
            Ok(data) => {
                inner.fetched_at = Some(Instant::now());
                QueryState::Success(Arc::clone(data))
            }
            Err(e) => {
                warn!(key = %self.key, "query failed: {e}");
                QueryState::Failure(e.clone())
            }
        };
        self.state.send_replace(next);
    }
}

fn erase<T, F, Fut>(fetch: F) -> Fetcher
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    Arc::new(move || {
        let request = fetch();
        async move { request.await.map(|data| Arc::new(data) as Arc<Erased>) }.boxed()
    })
}

/// The cache/invalidation coordinator. Cheap to clone; clones share entries.
/// Build one per application (or per test) and hand it to every consumer.
#[derive(Clone)]
pub struct QueryClient {
    entries: Cache<QueryKey, Arc<QueryEntry>>,
    config: CacheConfig,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl QueryClient {
    pub fn new(config: CacheConfig) -> Self {
        // Unbounded and without expiry: entries live as long as the client.
        let entries = Cache::builder().name("buildbridge-queries").build();
        Self { entries, config }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Observe `key`, fetching with `fetch` unless a usable state is cached or
    /// a request for the key is already in flight.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Query<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let init_key = key.clone();
        let entry = self
            .entries
            .get_with(key, async move { Arc::new(QueryEntry::new(init_key)) })
            .await;

        let rx = entry.observe();
        entry.ensure(erase(fetch), self.config.stale_time);
        Query::observing(entry, rx)
    }

    /// Invalidate every entry whose key starts with `prefix` and wait for the
    /// resulting refetches. Returns the number of entries invalidated.
    pub async fn invalidate_prefix(&self, prefix: &QueryKey) -> usize {
        self.invalidate_where(|key| key.starts_with(prefix)).await
    }

    pub async fn invalidate_exact(&self, key: &QueryKey) -> usize {
        self.invalidate_where(|candidate| candidate == key).await
    }

    async fn invalidate_where(&self, matches: impl Fn(&QueryKey) -> bool) -> usize {
        let mut invalidated = 0;
        let mut refetches = Vec::new();
        for (key, entry) in self.entries.iter() {
            if !matches(&*key) {
                continue;
            }
            invalidated += 1;
            if let Some(request) = entry.invalidate() {
                refetches.push(request);
            }
        }

        if invalidated > 0 {
            info!(invalidated, refetching = refetches.len(), "invalidated cached queries");
        }
        join_all(refetches).await;
        invalidated
    }

    /// Drop every entry. Live handles keep working but are detached from the cache.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}
