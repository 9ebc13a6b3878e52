//! Point-processing pipeline: cutoff filter, spatial dedup, normalization.
//!
//! Everything here is pure and synchronous. The [`ProcessRequest`] job is
//! the typed contract for running the pipeline off the caller's thread
//! (`tokio::task::spawn_blocking` in the orchestrator): raw batch plus
//! mode, window, and cutoff in; processed points plus average altitude out.

pub mod dedupe;
pub mod filter;
pub mod normalize;

pub use dedupe::dedupe;
pub use filter::filter_by_cutoff;
pub use normalize::{average_altitude, normalize, temperature_range};

use std::sync::Arc;

use crate::models::{OverlayMode, ProcessedThermalPoint, RawThermalPoint};

/// Input to one processing run.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Raw batch, shared with the cache rather than copied per scrub step.
    pub raw: Arc<Vec<RawThermalPoint>>,
    pub mode: OverlayMode,
    /// Cutoff timestamp, nanoseconds since epoch.
    pub cutoff: Option<i64>,
    /// Fire-mode trailing window, nanoseconds.
    pub window_nanos: i64,
    /// Fire-mode dedup bucket size, meters.
    pub bucket_meters: f64,
}

/// Output of one processing run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedBatch {
    pub points: Vec<ProcessedThermalPoint>,
    /// Mean sensor altitude of the batch; `None` when empty.
    pub avg_altitude: Option<f64>,
    /// Batch-wide (min, max) scene temperature for UI readouts.
    pub temperature_range: Option<(f64, f64)>,
}

impl ProcessedBatch {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            avg_altitude: None,
            temperature_range: None,
        }
    }
}

impl ProcessRequest {
    /// Run filter -> dedupe -> normalize and derive the batch aggregates.
    pub fn run(&self) -> ProcessedBatch {
        let filtered = filter_by_cutoff(&self.raw, self.cutoff, self.mode, self.window_nanos);
        let deduped = dedupe(&filtered, self.mode, self.bucket_meters);
        let points = normalize(&deduped);
        let avg_altitude = average_altitude(&points);
        let temperature_range = temperature_range(&deduped);

        ProcessedBatch {
            points,
            avg_altitude,
            temperature_range,
        }
    }
}
