use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::endpoints::{Elo, MatchupRole};

/// Compound key identifying one cached response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    ChampionList {
        patch: String,
        elo: Elo,
        included_data: String,
        limit: u32,
    },
    Matchups {
        patch: String,
        elo: Elo,
        champion_id: i64,
        role: Option<MatchupRole>,
    },
    SiteInformation {
        elo: Elo,
    },
}

#[derive(Debug)]
struct CachedResponse<V> {
    value: Arc<V>,
    cached_at: DateTime<Utc>,
}

impl<V> CachedResponse<V> {
    fn is_stale(&self, now: DateTime<Utc>, max_age: Option<Duration>) -> bool {
        match max_age {
            Some(max_age) => now.signed_duration_since(self.cached_at) > max_age,
            None => false,
        }
    }
}

/// In-process cache of decoded responses. Entries never expire unless a max
/// age is set.
#[derive(Debug)]
pub struct ResponseCache<V> {
    entries: HashMap<CacheKey, CachedResponse<V>>,
    max_age: Option<Duration>,
}

impl<V> ResponseCache<V> {
    /// A max age too large for a duration means entries never expire.
    pub fn new(max_age_mins: Option<u64>) -> Self {
        ResponseCache {
            entries: HashMap::new(),
            max_age: max_age_mins
                .and_then(|mins| i64::try_from(mins).ok())
                .and_then(Duration::try_minutes),
        }
    }

    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<Arc<V>> {
        self.entries
            .get(key)
            .filter(|cached| !cached.is_stale(now, self.max_age))
            .map(|cached| Arc::clone(&cached.value))
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<V>> {
        self.get_at(key, Utc::now())
    }

    pub fn insert_at(&mut self, key: CacheKey, value: V, now: DateTime<Utc>) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.insert(
            key,
            CachedResponse {
                value: Arc::clone(&value),
                cached_at: now,
            },
        );
        value
    }

    pub fn insert(&mut self, key: CacheKey, value: V) -> Arc<V> {
        self.insert_at(key, value, Utc::now())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
