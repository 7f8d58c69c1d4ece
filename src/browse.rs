//! Single-consumer browsing session over the query cache.

use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::{
    cache::{FetchResult, QueryCache, QueryKey, Staleness},
    debounce::Debouncer,
};

/// Logical query name for paginated catalog listings.
pub const CHARACTERS_QUERY: &str = "characters";

/// Drives one user's paginated, searchable view of the catalog.
///
/// Keystrokes are debounced into a settled filter, a settled filter change
/// resets the page to 1 (the old filter's page position is meaningless under
/// the new one), and a page that reports more data ahead warms the next page
/// in the background.
pub struct Browser {
    cache: QueryCache,
    staleness: Staleness,
    debouncer: Debouncer,
    settled: watch::Receiver<String>,
    page: u32,
    filter: String,
    has_more: bool,
}

impl Browser {
    pub fn new(cache: QueryCache, staleness: Staleness, quiescence: Duration) -> Self {
        let (debouncer, settled) = Debouncer::new(quiescence);
        Self {
            cache,
            staleness,
            debouncer,
            settled,
            page: 1,
            filter: String::new(),
            has_more: false,
        }
    }

    /// Feeds one filter-input change, e.g. the text after a keystroke.
    pub fn type_filter(&self, text: impl Into<String>) {
        self.debouncer.input(text);
    }

    /// Waits for the debouncer to settle on a new filter value, then applies
    /// it.
    pub async fn filter_settled(&mut self) {
        if self.settled.changed().await.is_ok() {
            self.apply_settled_filter();
        }
    }

    /// Resolves the current page through the cache and warms the next page
    /// when the result says more are available.
    pub async fn current_page(&mut self) -> FetchResult {
        self.apply_settled_filter();
        let result = self.cache.get(self.key(self.page), self.staleness).await;
        if let Ok(page) = &result {
            self.has_more = page.has_more;
            if page.has_more {
                self.cache.prefetch(self.key(self.page + 1), self.staleness);
            }
        }
        result
    }

    pub fn next_page(&mut self) {
        if self.has_more {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    fn key(&self, page: u32) -> QueryKey {
        QueryKey::new(CHARACTERS_QUERY, page, self.filter.clone())
    }

    fn apply_settled_filter(&mut self) {
        if !self.settled.has_changed().unwrap_or(false) {
            return;
        }
        let next = self.settled.borrow_and_update().clone();
        if next != self.filter {
            debug!(filter = %next, "filter settled, resetting to page 1");
            self.filter = next;
            self.page = 1;
            self.has_more = false;
        }
    }
}
