//! In-memory thermal source for tests and local development.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{OverlayError, OverlayResult};
use crate::models::RawThermalPoint;

use super::ThermalSource;

type Key = (String, Option<String>);

/// Map-backed source keyed by `(fire_id, flight_id)`.
///
/// Counts fetches so tests can assert the cache coalesces and reuses them,
/// and can be armed to fail to exercise the degraded paths.
#[derive(Default)]
pub struct InMemoryThermalSource {
    batches: RwLock<HashMap<Key, Vec<RawThermalPoint>>>,
    fetch_count: AtomicUsize,
    fail: RwLock<Option<String>>,
}

impl InMemoryThermalSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the batch returned for `(fire_id, flight_id)`.
    pub fn insert(
        &self,
        fire_id: impl Into<String>,
        flight_id: Option<&str>,
        points: Vec<RawThermalPoint>,
    ) {
        self.batches
            .write()
            .insert((fire_id.into(), flight_id.map(str::to_string)), points);
    }

    /// Make every subsequent fetch fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail.write() = Some(message.into());
    }

    /// Number of `fetch_thermal` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThermalSource for InMemoryThermalSource {
    async fn fetch_thermal(
        &self,
        fire_id: &str,
        flight_id: Option<&str>,
    ) -> OverlayResult<Vec<RawThermalPoint>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.fail.read().clone() {
            return Err(OverlayError::source(message));
        }

        let key = (fire_id.to_string(), flight_id.map(str::to_string));
        Ok(self.batches.read().get(&key).cloned().unwrap_or_default())
    }
}
