use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use spooky_core::config::GeocodeConfig;

use super::search::SimplifiedCandidate;

struct CachedSearch {
    stored_at: Instant,
    candidates: Vec<SimplifiedCandidate>,
}

/// Process-wide throttle and response cache in front of the geocoding provider.
///
/// One instance is shared by every request. The throttle is a sliding window
/// over the timestamps of allowed calls; the cache maps the exact query text
/// to the ranked suggestions and is only checked for expiry on read.
pub struct SearchGate {
    window: Duration,
    max_requests: usize,
    ttl: Duration,
    hits: Mutex<VecDeque<Instant>>,
    cache: Mutex<HashMap<String, CachedSearch>>,
}

impl std::fmt::Debug for SearchGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchGate")
            .field("window", &self.window)
            .field("max_requests", &self.max_requests)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SearchGate {
    #[must_use]
    pub fn new(window: Duration, max_requests: usize, ttl: Duration) -> Self {
        Self {
            window,
            max_requests,
            ttl,
            hits: Mutex::new(VecDeque::with_capacity(max_requests)),
            cache: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn from_config(config: &GeocodeConfig) -> Self {
        Self::new(
            Duration::from_secs(config.rate_limit_window_secs),
            config.rate_limit_max_requests,
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    /// ## Summary
    /// Records a call and reports whether it fits in the current window.
    ///
    /// Rejected calls are not recorded, so a client that keeps retrying does
    /// not extend its own lockout.
    #[must_use]
    pub fn should_allow(&self) -> bool {
        self.should_allow_at(Instant::now())
    }

    #[must_use]
    pub fn should_allow_at(&self, now: Instant) -> bool {
        let mut hits = lock(&self.hits);
        while hits
            .front()
            .is_some_and(|&hit| now.saturating_duration_since(hit) >= self.window)
        {
            hits.pop_front();
        }

        if hits.len() >= self.max_requests {
            tracing::debug!(recent = hits.len(), "Search rate limit reached");
            return false;
        }

        hits.push_back(now);
        true
    }

    #[must_use]
    pub fn get_cached(&self, query: &str) -> Option<Vec<SimplifiedCandidate>> {
        self.get_cached_at(query, Instant::now())
    }

    #[must_use]
    pub fn get_cached_at(&self, query: &str, now: Instant) -> Option<Vec<SimplifiedCandidate>> {
        let cache = lock(&self.cache);
        let entry = cache.get(query)?;
        (now.saturating_duration_since(entry.stored_at) < self.ttl)
            .then(|| entry.candidates.clone())
    }

    pub fn put_cached(&self, query: &str, candidates: Vec<SimplifiedCandidate>) {
        self.put_cached_at(query, candidates, Instant::now());
    }

    pub fn put_cached_at(&self, query: &str, candidates: Vec<SimplifiedCandidate>, now: Instant) {
        lock(&self.cache).insert(
            query.to_string(),
            CachedSearch {
                stored_at: now,
                candidates,
            },
        );
    }
}
