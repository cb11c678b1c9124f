//! Search-as-you-type over the movie lookup.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::MovieSummary;
use crate::error::LookupError;
use crate::ports::MovieLookup;

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Suggestions kept from a search response.
pub const MAX_SUGGESTIONS: usize = 5;

/// One search round trip, truncated to the suggestion limit.
pub async fn suggest(
    lookup: &dyn MovieLookup,
    query: &str,
) -> Result<Vec<MovieSummary>, LookupError> {
    let mut movies = lookup.search_by_title(query).await?;
    movies.truncate(MAX_SUGGESTIONS);
    Ok(movies)
}

/// Debounced movie search with stale-response suppression.
///
/// At most one timer is pending; each keystroke aborts it and starts a new
/// one. When a timer fires it takes the next sequence number and issues the
/// request. A response is published only if its sequence number is still the
/// latest, so a slow early request can never overwrite a newer result.
/// Requests already in flight are not cancelled.
///
/// Must be used from within a tokio runtime.
pub struct MovieSearch {
    lookup: Arc<dyn MovieLookup>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    latest: Arc<AtomicU64>,
    results: Arc<watch::Sender<Vec<MovieSummary>>>,
}

impl MovieSearch {
    pub fn new(lookup: Arc<dyn MovieLookup>) -> Self {
        Self::with_delay(lookup, SEARCH_DEBOUNCE)
    }

    pub fn with_delay(lookup: Arc<dyn MovieLookup>, delay: Duration) -> Self {
        let (results, _) = watch::channel(Vec::new());
        Self {
            lookup,
            delay,
            pending: None,
            latest: Arc::new(AtomicU64::new(0)),
            results: Arc::new(results),
        }
    }

    /// Feed the current contents of the search box.
    ///
    /// Empty input clears suggestions immediately without a remote call.
    pub fn input(&mut self, query: &str) {
        if query.is_empty() {
            self.clear();
            return;
        }
        self.cancel_timer();

        let lookup = Arc::clone(&self.lookup);
        let latest = Arc::clone(&self.latest);
        let results = Arc::clone(&self.results);
        let delay = self.delay;
        let query = query.to_string();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let seq = latest.fetch_add(1, Ordering::SeqCst) + 1;

            // Detached so a later keystroke aborts only the timer.
            tokio::spawn(async move {
                let found = match suggest(lookup.as_ref(), &query).await {
                    Ok(movies) => movies,
                    Err(e) => {
                        tracing::warn!(query = %query, error = %e, "Movie search failed");
                        Vec::new()
                    }
                };

                if latest.load(Ordering::SeqCst) == seq {
                    tracing::debug!(query = %query, seq, hits = found.len(), "Search results");
                    results.send_replace(found);
                } else {
                    tracing::debug!(query = %query, seq, "Discarding stale search response");
                }
            });
        }));
    }

    /// Drop the pending timer, invalidate in-flight responses and empty the
    /// suggestion list.
    pub fn clear(&mut self) {
        self.cancel_timer();
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.results.send_replace(Vec::new());
    }

    /// Current suggestions.
    pub fn suggestions(&self) -> Vec<MovieSummary> {
        self.results.borrow().clone()
    }

    /// Watch suggestions as they change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<MovieSummary>> {
        self.results.subscribe()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

impl Drop for MovieSearch {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
