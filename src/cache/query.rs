use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::watch;

use super::QueryEntry;
use super::keys::QueryKey;
use crate::error::ApiError;

pub(crate) type Erased = dyn Any + Send + Sync;

/// Observable state of one cache entry.
///
/// `NotRequested` is a query that has not run: either a disabled query (its
/// required id is missing) or an entry nobody has fetched yet. It is never
/// conflated with `Loading`.
pub enum QueryState<T: ?Sized> {
    NotRequested,
    Loading,
    Success(Arc<T>),
    Failure(ApiError),
}

impl<T: ?Sized> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::NotRequested => Self::NotRequested,
            Self::Loading => Self::Loading,
            Self::Success(data) => Self::Success(Arc::clone(data)),
            Self::Failure(e) => Self::Failure(e.clone()),
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for QueryState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRequested => f.write_str("NotRequested"),
            Self::Loading => f.write_str("Loading"),
            Self::Success(data) => f.debug_tuple("Success").field(data).finish(),
            Self::Failure(e) => f.debug_tuple("Failure").field(e).finish(),
        }
    }
}

impl<T: ?Sized> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }

    pub fn data(&self) -> Option<Arc<T>> {
        match self {
            Self::Success(data) => Some(Arc::clone(data)),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failure(e) => Some(e),
            _ => None,
        }
    }

    /// `None` while not requested or loading.
    pub fn into_result(self) -> Option<Result<Arc<T>, ApiError>> {
        match self {
            Self::Success(data) => Some(Ok(data)),
            Self::Failure(e) => Some(Err(e)),
            Self::NotRequested | Self::Loading => None,
        }
    }
}

impl QueryState<Erased> {
    pub(crate) fn downcast<T: Send + Sync + 'static>(&self) -> QueryState<T> {
        match self {
            Self::NotRequested => QueryState::NotRequested,
            Self::Loading => QueryState::Loading,
            Self::Failure(e) => QueryState::Failure(e.clone()),
            Self::Success(data) => match Arc::clone(data).downcast::<T>() {
                Ok(data) => QueryState::Success(data),
                Err(_) => QueryState::Failure(ApiError::Decode(
                    "cached value has a different type for this key".to_string(),
                )),
            },
        }
    }
}

struct Observer {
    entry: Arc<QueryEntry>,
    rx: watch::Receiver<QueryState<Erased>>,
}

/// A consumer's handle on a cached query. The entry counts as observed (and is
/// refetched on invalidation) for as long as at least one handle is alive.
pub struct Query<T> {
    observer: Option<Observer>,
    _data: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> Query<T> {
    pub(crate) fn observing(entry: Arc<QueryEntry>, rx: watch::Receiver<QueryState<Erased>>) -> Self {
        Self {
            observer: Some(Observer { entry, rx }),
            _data: PhantomData,
        }
    }

    /// A query whose precondition is unmet. It never issues a request.
    pub fn disabled() -> Self {
        Self {
            observer: None,
            _data: PhantomData,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.observer.is_some()
    }

    pub fn key(&self) -> Option<&QueryKey> {
        self.observer.as_ref().map(|o| o.entry.key())
    }

    pub fn state(&self) -> QueryState<T> {
        match &self.observer {
            Some(o) => o.rx.borrow().downcast(),
            None => QueryState::NotRequested,
        }
    }

    pub fn data(&self) -> Option<Arc<T>> {
        self.state().data()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.state().error().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    /// Wait until the entry is no longer loading and return its state.
    /// Returns `NotRequested` immediately for a disabled query.
    pub async fn settled(&mut self) -> QueryState<T> {
        let Some(o) = self.observer.as_mut() else {
            return QueryState::NotRequested;
        };
        match o.rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.downcast(),
            Err(_) => QueryState::Failure(ApiError::request("query entry was dropped")),
        }
    }

    /// Wait for the next state change. Returns `false` for a disabled query.
    pub async fn changed(&mut self) -> bool {
        match self.observer.as_mut() {
            Some(o) => o.rx.changed().await.is_ok(),
            None => false,
        }
    }

    /// Issue a new request for this key, bypassing the cached value, and
    /// wait for the entry to settle. Does nothing for a disabled query.
    pub async fn refetch(&mut self) -> QueryState<T> {
        let Some(o) = self.observer.as_ref() else {
            return QueryState::NotRequested;
        };
        if let Some(request) = o.entry.force() {
            let _ = request.await;
        }
        self.settled().await
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.observer {
            Some(o) => f
                .debug_struct("Query")
                .field("key", &o.entry.key().to_string())
                .field("state", &*o.rx.borrow())
                .finish(),
            None => f.write_str("Query(disabled)"),
        }
    }
}
