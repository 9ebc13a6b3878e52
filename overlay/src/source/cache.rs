//! Raw-point cache.
//!
//! One entry per `(fire_id, flight_id)`, filled once per overlay lifetime so
//! time-scrubbing reprocesses cached points instead of refetching. Naive
//! caching races on first load, so concurrent requests for the same key
//! coalesce onto a single in-flight fetch through a per-entry `OnceCell`.
//!
//! Failure semantics: a fetch error or an empty response caches an empty
//! batch with a warning. Empty means "no data to render", never fatal, and
//! no retries happen behind the caller's back; `invalidate` is the explicit
//! path to a fresh fetch.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::models::RawThermalPoint;

use super::ThermalSource;

/// Cache key: fire plus optional flight scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub fire_id: String,
    pub flight_id: Option<String>,
}

impl CacheKey {
    pub fn new(fire_id: &str, flight_id: Option<&str>) -> Self {
        Self {
            fire_id: fire_id.to_string(),
            flight_id: flight_id.map(str::to_string),
        }
    }
}

type Batch = Arc<Vec<RawThermalPoint>>;

/// Per-key cache of floor-filtered raw batches.
pub struct RawPointCache {
    /// Readings with `high_temp` below this never enter the cache.
    min_high_temp: f64,
    entries: Mutex<HashMap<CacheKey, Arc<OnceCell<Batch>>>>,
}

impl RawPointCache {
    pub fn new(min_high_temp: f64) -> Self {
        Self {
            min_high_temp,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached batch for the key, fetching it through `source`
    /// on first request. Concurrent callers for the same key share one
    /// fetch.
    pub async fn get_or_fetch(
        &self,
        source: &dyn ThermalSource,
        fire_id: &str,
        flight_id: Option<&str>,
    ) -> Batch {
        let key = CacheKey::new(fire_id, flight_id);
        let cell = {
            let mut entries = self.entries.lock();
            Arc::clone(entries.entry(key).or_default())
        };

        cell.get_or_init(|| self.fetch_filtered(source, fire_id, flight_id))
            .await
            .clone()
    }

    async fn fetch_filtered(
        &self,
        source: &dyn ThermalSource,
        fire_id: &str,
        flight_id: Option<&str>,
    ) -> Batch {
        let points = match source.fetch_thermal(fire_id, flight_id).await {
            Ok(points) => points,
            Err(e) => {
                log::warn!("Thermal fetch failed for fire '{}': {}", fire_id, e);
                return Arc::new(Vec::new());
            }
        };

        let total = points.len();
        let kept: Vec<RawThermalPoint> = points
            .into_iter()
            .filter(|p| p.high_temp >= self.min_high_temp)
            .collect();

        if kept.is_empty() {
            log::warn!(
                "No thermal data for fire '{}' ({} of {} readings above the {} floor)",
                fire_id,
                kept.len(),
                total,
                self.min_high_temp
            );
        } else {
            log::debug!(
                "Cached {} of {} thermal readings for fire '{}'",
                kept.len(),
                total,
                fire_id
            );
        }

        Arc::new(kept)
    }

    /// Drop one entry so the next request refetches.
    pub fn invalidate(&self, key: &CacheKey) {
        self.entries.lock().remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryThermalSource;

    fn point(high: f64, ts: i64) -> RawThermalPoint {
        RawThermalPoint {
            latitude: 39.3,
            longitude: -119.8,
            high_temp: high,
            low_temp: high - 30.0,
            altitude: Some(400.0),
            time_stamp: ts,
        }
    }

    #[tokio::test]
    async fn test_fetch_once_then_cached() {
        let source = InMemoryThermalSource::new();
        source.insert("caldor", None, vec![point(320.0, 1), point(330.0, 2)]);
        let cache = RawPointCache::new(200.0);

        let first = cache.get_or_fetch(&source, "caldor", None).await;
        let second = cache.get_or_fetch(&source, "caldor", None).await;

        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_floor_filter_is_permanent() {
        let source = InMemoryThermalSource::new();
        source.insert(
            "caldor",
            None,
            vec![point(150.0, 1), point(250.0, 2), point(199.9, 3)],
        );
        let cache = RawPointCache::new(200.0);

        let batch = cache.get_or_fetch(&source, "caldor", None).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].time_stamp, 2);
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty() {
        let source = InMemoryThermalSource::new();
        source.fail_with("timeout");
        let cache = RawPointCache::new(200.0);

        let batch = cache.get_or_fetch(&source, "caldor", None).await;
        assert!(batch.is_empty());
        // No retry on the next call either; the empty batch is cached.
        let again = cache.get_or_fetch(&source, "caldor", None).await;
        assert!(again.is_empty());
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_coalesce() {
        let source = Arc::new(InMemoryThermalSource::new());
        source.insert("caldor", None, vec![point(320.0, 1)]);
        let cache = Arc::new(RawPointCache::new(200.0));

        let loads = (0..8).map(|_| {
            let cache = Arc::clone(&cache);
            let source = Arc::clone(&source);
            async move { cache.get_or_fetch(source.as_ref(), "caldor", None).await }
        });
        let batches = futures::future::join_all(loads).await;

        assert!(batches.iter().all(|batch| batch.len() == 1));
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = InMemoryThermalSource::new();
        source.insert("caldor", None, vec![point(320.0, 1)]);
        let cache = RawPointCache::new(200.0);

        cache.get_or_fetch(&source, "caldor", None).await;
        cache.invalidate(&CacheKey::new("caldor", None));
        cache.get_or_fetch(&source, "caldor", None).await;

        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_keys_are_scoped_by_flight() {
        let source = InMemoryThermalSource::new();
        source.insert("caldor", None, vec![point(320.0, 1)]);
        source.insert("caldor", Some("flight-7"), vec![point(320.0, 2), point(330.0, 3)]);
        let cache = RawPointCache::new(200.0);

        let fire = cache.get_or_fetch(&source, "caldor", None).await;
        let flight = cache.get_or_fetch(&source, "caldor", Some("flight-7")).await;

        assert_eq!(fire.len(), 1);
        assert_eq!(flight.len(), 2);
        assert_eq!(source.fetch_count(), 2);
    }
}
