//! Caching layer for leg lookups.
//!
//! Options returned by one search often share patterns: the same route
//! between the same stops shows up under several access modes and transfer
//! variants. Caching resolver results by query means each pattern range is
//! read from the timetable once per day window.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::StopPairSchedule;
use crate::planner::{LegQuery, LegResolver, ResolveError};

/// Cached lookup result.
type LegEntry = Arc<Vec<StopPairSchedule>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of resolver results keyed by query.
pub struct LegCache {
    entries: MokaCache<LegQuery, LegEntry>,
}

impl LegCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Get a cached entry.
    pub async fn get(&self, query: &LegQuery) -> Option<LegEntry> {
        self.entries.get(query).await
    }

    /// Insert an entry.
    pub async fn insert(&self, query: LegQuery, entry: LegEntry) {
        self.entries.insert(query, entry).await;
    }
}

/// Resolver with caching.
///
/// Wraps any `LegResolver` and caches successful lookups. Failures are not
/// cached.
pub struct CachedResolver<R> {
    resolver: R,
    cache: LegCache,
}

impl<R: LegResolver> CachedResolver<R> {
    /// Create a new cached resolver.
    pub fn new(resolver: R, cache_config: &CacheConfig) -> Self {
        Self {
            resolver,
            cache: LegCache::new(cache_config),
        }
    }
}

impl<R: LegResolver> LegResolver for CachedResolver<R> {
    async fn resolve(&self, query: &LegQuery) -> Result<Vec<StopPairSchedule>, ResolveError> {
        if let Some(cached) = self.cache.get(query).await {
            return Ok(cached.as_ref().clone());
        }

        debug!(
            pattern = %query.pattern_id,
            from = query.from_index,
            to = query.to_index,
            "leg cache miss"
        );
        let pairs = self.resolver.resolve(query).await?;
        self.cache
            .insert(query.clone(), Arc::new(pairs.clone()))
            .await;

        Ok(pairs)
    }
}
