//! Fetch coordination for the list and detail views.
//!
//! A [`FetchCoordinator`] owns the result of one view. Each request is tagged
//! with a generation number; only the most recently issued request may write
//! its result, so a slow response for an old query never replaces the answer
//! to a newer one.

pub mod loaders;

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::api::ApiError;

pub use loaders::{MerchantDetailLoader, MerchantListLoader, ReportsLoader, TransactionListLoader};

/// Performs the read behind a coordinator
#[async_trait]
pub trait Loader: Send + Sync {
    type Key: Clone + PartialEq + fmt::Debug + Send + Sync;
    type Output: Clone + Send + Sync;

    async fn load(&self, key: &Self::Key) -> Result<Self::Output, ApiError>;
}

/// Status of the most recent request
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet
    Idle,
    Loading,
    Failed(ApiError),
    Ready(T),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Handle for one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What happened to a request's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result is now the coordinator's state
    Applied,
    /// A newer request was issued first; the result was dropped
    Superseded,
    /// The key did not change, so nothing was requested
    Unchanged,
}

struct Inner<K, T> {
    issued: u64,
    key: Option<K>,
    state: FetchState<T>,
}

pub struct FetchCoordinator<L: Loader> {
    loader: L,
    inner: Mutex<Inner<L::Key, L::Output>>,
}

impl<L: Loader> FetchCoordinator<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            inner: Mutex::new(Inner {
                issued: 0,
                key: None,
                state: FetchState::Idle,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<L::Key, L::Output>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> FetchState<L::Output> {
        self.lock().state.clone()
    }

    /// Key of the latest issued request
    pub fn key(&self) -> Option<L::Key> {
        self.lock().key.clone()
    }

    /// Record a new request for `key` and move to `Loading`
    pub fn begin(&self, key: L::Key) -> Ticket {
        let mut inner = self.lock();
        inner.issued += 1;
        inner.key = Some(key);
        inner.state = FetchState::Loading;
        Ticket(inner.issued)
    }

    /// Store `result` if `ticket` is still the latest request
    pub fn complete(&self, ticket: Ticket, result: Result<L::Output, ApiError>) -> FetchOutcome {
        let mut inner = self.lock();
        if ticket.0 != inner.issued {
            debug!(
                "Discarding stale response (generation {}, latest {})",
                ticket.0, inner.issued
            );
            return FetchOutcome::Superseded;
        }
        inner.state = match result {
            Ok(data) => FetchState::Ready(data),
            Err(err) => FetchState::Failed(err),
        };
        FetchOutcome::Applied
    }

    /// Fetch for `key` unless it is the key already requested
    pub async fn set_key(&self, key: L::Key) -> FetchOutcome {
        if self.lock().key.as_ref() == Some(&key) {
            return FetchOutcome::Unchanged;
        }
        self.run(key).await
    }

    /// Fetch for `key` even when it is the key already requested.
    ///
    /// Entering a view uses this so the result is never carried over from an
    /// earlier visit.
    pub async fn reload(&self, key: L::Key) -> FetchOutcome {
        self.run(key).await
    }

    /// Re-issue the latest request
    pub async fn refetch(&self) -> FetchOutcome {
        match self.key() {
            Some(key) => self.run(key).await,
            None => FetchOutcome::Unchanged,
        }
    }

    async fn run(&self, key: L::Key) -> FetchOutcome {
        let ticket = self.begin(key.clone());
        let result = self.loader.load(&key).await;
        self.complete(ticket, result)
    }
}
