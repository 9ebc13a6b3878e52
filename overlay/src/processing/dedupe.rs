//! Spatial deduplication.
//!
//! The sensor passes over the same ground repeatedly; without bucketing,
//! stationary hot spots get double-counted and bias the normalization
//! range. Fire mode keeps one point per fixed-size ground bucket. Flight
//! mode is a trajectory where re-visits are meaningful, so it keeps
//! everything.

use std::collections::HashMap;

use crate::models::{OverlayMode, RawThermalPoint};

/// Meters per degree of latitude.
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Deduplicate a batch according to the overlay mode.
///
/// Fire mode partitions points into ground buckets of `bucket_meters` per
/// side. Latitude degrees per bucket are constant; longitude degrees are
/// corrected by `cos(latitude)` per point. The most recent point wins each
/// bucket; points sharing an identical timestamp tie-break arbitrarily
/// (hash-map iteration order), which is accepted behavior.
pub fn dedupe(
    points: &[RawThermalPoint],
    mode: OverlayMode,
    bucket_meters: f64,
) -> Vec<RawThermalPoint> {
    match mode {
        OverlayMode::Flight => points.to_vec(),
        OverlayMode::Fire => {
            let bucket_lat = bucket_meters / METERS_PER_DEG_LAT;
            let mut buckets: HashMap<(i64, i64), RawThermalPoint> = HashMap::new();

            for p in points {
                let key_lat = (p.latitude / bucket_lat).floor() as i64;
                let meters_per_deg_lon =
                    METERS_PER_DEG_LAT * p.latitude.to_radians().cos();
                let bucket_lon = bucket_meters / meters_per_deg_lon;
                let key_lon = (p.longitude / bucket_lon).floor() as i64;

                match buckets.entry((key_lat, key_lon)) {
                    std::collections::hash_map::Entry::Occupied(mut e) => {
                        if p.time_stamp > e.get().time_stamp {
                            e.insert(p.clone());
                        }
                    }
                    std::collections::hash_map::Entry::Vacant(e) => {
                        e.insert(p.clone());
                    }
                }
            }

            buckets.into_values().collect()
        }
    }
}
