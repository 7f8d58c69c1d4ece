//! Keyed query cache with single-flight fetches and background prefetch.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{error::FetchError, models::CharacterPage};

/// Source of catalog pages. The cache is handed its fetcher at construction
/// so tests can drive it with a stub instead of the live client.
pub trait FetchPages: Send + Sync + 'static {
    fn fetch(&self, page: u32, filter: &str) -> BoxFuture<'static, Result<CharacterPage, FetchError>>;
}

/// Cache key: logical query name, page, and filter text. Pages below 1 are
/// clamped at construction.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct QueryKey {
    pub query: &'static str,
    pub page: u32,
    pub filter: String,
}

impl QueryKey {
    pub fn new(query: &'static str, page: u32, filter: impl Into<String>) -> Self {
        Self { query, page: page.max(1), filter: filter.into() }
    }
}

/// How long a cached success stays fresh for the calling site.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Staleness {
    /// Fresh for the lifetime of the process.
    Never,
    /// Fresh until the given duration has elapsed since the fetch completed.
    After(Duration),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryStatus {
    Pending,
    Success,
    Error,
}

pub type FetchResult = Result<CharacterPage, FetchError>;

type InFlight = Shared<BoxFuture<'static, FetchResult>>;

struct Entry {
    value: FetchResult,
    fetched_at: Instant,
    last_used: u64,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    inflight: HashMap<QueryKey, InFlight>,
    clock: u64,
}

/// Keyed store of page-fetch results.
///
/// All state sits behind one mutex that is never held across an await.
/// Same-key fetches collapse into a single shared in-flight future, and a
/// completed fetch writes back only under the key it was started for, so a
/// response arriving after the consumer moved to a different key can never
/// overwrite the new key's entry.
#[derive(Clone)]
pub struct QueryCache {
    fetcher: Arc<dyn FetchPages>,
    max_entries: Option<usize>,
    inner: Arc<Mutex<Inner>>,
}

impl QueryCache {
    pub fn new(fetcher: Arc<dyn FetchPages>, max_entries: Option<usize>) -> Self {
        Self { fetcher, max_entries, inner: Arc::new(Mutex::new(Inner::default())) }
    }

    /// Returns the result for `key`, fetching it if needed.
    ///
    /// A fresh cached success is returned as-is. A stale success is returned
    /// immediately while a refresh runs in the background. A cached error is
    /// refetched, so navigating back to a failed page acts as the retry.
    pub async fn get(&self, key: QueryKey, staleness: Staleness) -> FetchResult {
        enum Plan {
            Hit(FetchResult),
            Revalidate(FetchResult, InFlight),
            Await(InFlight),
        }

        let plan = {
            let mut inner = self.lock();
            inner.clock += 1;
            let tick = inner.clock;

            let cached = match inner.entries.get_mut(&key) {
                Some(entry) => {
                    entry.last_used = tick;
                    Some((entry.value.clone(), entry.fetched_at))
                },
                None => None,
            };

            match cached {
                Some((value @ Ok(_), fetched_at)) if is_fresh(fetched_at, staleness) => {
                    Plan::Hit(value)
                },
                Some((value @ Ok(_), _)) => {
                    debug!(key = ?key, "stale entry, refreshing in background");
                    Plan::Revalidate(value, self.begin_fetch(&mut inner, &key))
                },
                // A cached error and a miss both wait on a fetch, joining one
                // already in flight for this key if there is one.
                _ => Plan::Await(self.begin_fetch(&mut inner, &key)),
            }
        };

        match plan {
            Plan::Hit(value) => value,
            Plan::Revalidate(value, flight) => {
                tokio::spawn(flight);
                value
            },
            Plan::Await(flight) => flight.await,
        }
    }

    /// Warms `key` in the background without blocking the caller. Does
    /// nothing when a fresh success is cached or a fetch is already in
    /// flight for the key.
    pub fn prefetch(&self, key: QueryKey, staleness: Staleness) {
        let flight = {
            let mut inner = self.lock();
            if let Some(entry) = inner.entries.get(&key) {
                if entry.value.is_ok() && is_fresh(entry.fetched_at, staleness) {
                    return;
                }
            }
            if inner.inflight.contains_key(&key) {
                return;
            }
            debug!(key = ?key, "prefetching");
            self.begin_fetch(&mut inner, &key)
        };
        tokio::spawn(flight);
    }

    /// Current fetch status for `key`, if the cache has seen the key at all.
    pub fn status(&self, key: &QueryKey) -> Option<QueryStatus> {
        let inner = self.lock();
        if inner.inflight.contains_key(key) {
            return Some(QueryStatus::Pending);
        }
        inner.entries.get(key).map(|entry| match entry.value {
            Ok(_) => QueryStatus::Success,
            Err(_) => QueryStatus::Error,
        })
    }

    /// The cached result for `key`, however stale, without triggering a
    /// fetch.
    pub fn peek(&self, key: &QueryKey) -> Option<FetchResult> {
        self.lock().entries.get(key).map(|entry| entry.value.clone())
    }

    fn begin_fetch(&self, inner: &mut Inner, key: &QueryKey) -> InFlight {
        if let Some(flight) = inner.inflight.get(key) {
            return flight.clone();
        }

        let cache = self.clone();
        let fetcher = self.fetcher.clone();
        let owned = key.clone();
        let flight = async move {
            let result = fetcher.fetch(owned.page, &owned.filter).await;
            if let Err(err) = &result {
                warn!(key = ?owned, error = %err, "fetch failed");
            }
            cache.complete(&owned, result.clone());
            result
        }
        .boxed()
        .shared();

        inner.inflight.insert(key.clone(), flight.clone());
        flight
    }

    fn complete(&self, key: &QueryKey, value: FetchResult) {
        let mut inner = self.lock();
        inner.inflight.remove(key);
        inner.clock += 1;
        let tick = inner.clock;
        inner
            .entries
            .insert(key.clone(), Entry { value, fetched_at: Instant::now(), last_used: tick });

        if let Some(cap) = self.max_entries {
            while inner.entries.len() > cap {
                let Some(oldest) = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_used)
                    .map(|(key, _)| key.clone())
                else {
                    break;
                };
                debug!(key = ?oldest, "evicting least recently used entry");
                inner.entries.remove(&oldest);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_fresh(fetched_at: Instant, staleness: Staleness) -> bool {
    match staleness {
        Staleness::Never => true,
        Staleness::After(window) => fetched_at.elapsed() < window,
    }
}
