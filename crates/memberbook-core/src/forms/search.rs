use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delay between the last keystroke and the remote call.
const DEBOUNCE_MS: u64 = 300;

/// Queries shorter than this never hit the network.
const MIN_QUERY_LEN: usize = 2;

/// Debounced remote search with explicit keystroke generations.
///
/// Each call supersedes every earlier one: the fetch only runs if no newer
/// call arrived during the debounce delay, and its result is only handed
/// back if no newer call arrived while the fetch was in flight. The
/// visible result set is therefore always the latest request's
/// (last-request-wins, never last-response-wins).
#[derive(Clone)]
pub struct DebouncedSearch {
    generation: Arc<AtomicU64>,
    debounce: Duration,
}

impl Default for DebouncedSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl DebouncedSearch {
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(DEBOUNCE_MS))
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            debounce,
        }
    }

    /// Run one keystroke generation. Returns `None` when the query is too
    /// short or the generation was superseded; `Some(fetch result)` only
    /// for the latest generation.
    pub async fn run<T, F, Fut>(&self, query: &str, fetch: F) -> Option<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = T>,
    {
        // A short query still supersedes a pending longer one, exactly
        // like a keystroke resetting the debounce timer.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if query.len() < MIN_QUERY_LEN {
            return None;
        }

        tokio::time::sleep(self.debounce).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return None;
        }

        let value = fetch(query.to_string()).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return None;
        }
        Some(value)
    }
}
