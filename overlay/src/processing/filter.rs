//! Time-cutoff filtering.

use crate::models::{OverlayMode, RawThermalPoint};

/// Retain points visible at `cutoff` nanoseconds.
///
/// No cutoff means no filtering. With a cutoff, points after it are dropped
/// in both modes. Fire mode additionally drops points older than
/// `cutoff - window_nanos` so the overlay shows a bounded trailing window
/// instead of full history; a flight is bounded by construction and keeps
/// everything up to the cutoff.
pub fn filter_by_cutoff(
    points: &[RawThermalPoint],
    cutoff: Option<i64>,
    mode: OverlayMode,
    window_nanos: i64,
) -> Vec<RawThermalPoint> {
    let Some(cutoff) = cutoff else {
        return points.to_vec();
    };

    points
        .iter()
        .filter(|p| p.time_stamp <= cutoff)
        .filter(|p| match mode {
            OverlayMode::Fire => p.time_stamp >= cutoff.saturating_sub(window_nanos),
            OverlayMode::Flight => true,
        })
        .cloned()
        .collect()
}
