use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use metrics::counter;

use crate::domain::feed::FeedDocument;

use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

pub(crate) const METRIC_FEED_CACHE_HIT_TOTAL: &str = "oddsgate_feed_cache_hit_total";
pub(crate) const METRIC_FEED_CACHE_MISS_TOTAL: &str = "oddsgate_feed_cache_miss_total";

struct CacheEntry {
    document: FeedDocument,
    expires_at: Instant,
}

impl CacheEntry {
    /// Usable strictly before the expiry instant.
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Per-language feed documents with a fixed time-to-live.
///
/// Shared across all in-flight requests. The key space is the fixed language
/// set, so no size bound is applied. A concurrent check-then-fetch-then-store
/// for one language is not atomic; the worst case is a duplicate upstream
/// fetch whose result overwrites the first.
pub struct FeedCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The live document for `language`; expired entries read as absent.
    pub fn get(&self, language: &str) -> Option<FeedDocument> {
        let entries = rw_read(&self.entries, SOURCE, "get");
        match entries
            .get(language)
            .filter(|entry| entry.is_live(Instant::now()))
        {
            Some(entry) => {
                counter!(METRIC_FEED_CACHE_HIT_TOTAL).increment(1);
                Some(entry.document.clone())
            }
            None => {
                counter!(METRIC_FEED_CACHE_MISS_TOTAL).increment(1);
                None
            }
        }
    }

    /// Store `document` unconditionally, resetting the expiry to now + TTL.
    pub fn put(&self, language: &str, document: FeedDocument) {
        let entry = CacheEntry {
            document,
            expires_at: Instant::now() + self.ttl,
        };
        rw_write(&self.entries, SOURCE, "put").insert(language.to_string(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_documents_are_returned_before_expiry() {
        let cache = FeedCache::new(Duration::from_secs(3600));
        assert!(cache.get("en-gb").is_none());

        cache.put("en-gb", json!({ "result": { "sports": [] } }));
        assert_eq!(
            cache.get("en-gb"),
            Some(json!({ "result": { "sports": [] } }))
        );
        assert!(cache.get("de-de").is_none());
    }

    #[test]
    fn zero_ttl_entries_are_indistinguishable_from_absent() {
        let cache = FeedCache::new(Duration::ZERO);
        cache.put("en-gb", json!({ "sports": [] }));
        assert!(cache.get("en-gb").is_none());
    }

    #[test]
    fn put_overwrites_and_resets_expiry() {
        let cache = FeedCache::new(Duration::from_secs(3600));
        cache.put("en-gb", json!({ "generation": 1 }));
        cache.put("en-gb", json!({ "generation": 2 }));
        assert_eq!(cache.get("en-gb"), Some(json!({ "generation": 2 })));
    }
}
