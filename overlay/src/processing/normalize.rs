//! Intensity normalization.

use crate::models::{ProcessedThermalPoint, RawThermalPoint};

/// Normalize a batch into [0, 1] intensities against the batch-wide min/max
/// average temperature.
///
/// A batch where every point shares the same average temperature maps to
/// intensity 1 for all points. That is defined policy, not a degenerate
/// case: a uniform batch is uniformly hot relative to itself, and it keeps
/// the division well-defined.
pub fn normalize(points: &[RawThermalPoint]) -> Vec<ProcessedThermalPoint> {
    let mut min_avg = f64::INFINITY;
    let mut max_avg = f64::NEG_INFINITY;
    for p in points {
        let avg = p.avg_temp();
        min_avg = min_avg.min(avg);
        max_avg = max_avg.max(avg);
    }
    let span = max_avg - min_avg;

    points
        .iter()
        .map(|p| ProcessedThermalPoint {
            latitude: p.latitude,
            longitude: p.longitude,
            intensity: if span > 0.0 {
                (p.avg_temp() - min_avg) / span
            } else {
                1.0
            },
            altitude: p.altitude,
            time_stamp: p.time_stamp,
        })
        .collect()
}

/// Mean sensor altitude of a processed batch, `None` when the batch is
/// empty.
///
/// Missing or zero altitudes count as 0 in the mean, biasing it down. That
/// matches the deployed behavior; whether such points should instead be
/// excluded is an open product decision (see DESIGN.md).
pub fn average_altitude(points: &[ProcessedThermalPoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let sum: f64 = points.iter().map(|p| p.altitude.unwrap_or(0.0)).sum();
    Some(sum / points.len() as f64)
}

/// Batch-wide min/max scene temperature, for the UI readout next to the
/// map. `None` for an empty batch.
pub fn temperature_range(points: &[RawThermalPoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        min = min.min(p.low_temp);
        max = max.max(p.high_temp);
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(high: f64, low: f64, altitude: Option<f64>) -> RawThermalPoint {
        RawThermalPoint {
            latitude: 39.3,
            longitude: -119.8,
            high_temp: high,
            low_temp: low,
            altitude,
            time_stamp: 0,
        }
    }

    #[test]
    fn test_three_point_scenario() {
        // Averages 290, 305, 297.5 -> intensities 0.0, 1.0, 0.5
        let points = vec![
            point(300.0, 280.0, None),
            point(320.0, 290.0, None),
            point(310.0, 285.0, None),
        ];
        let out = normalize(&points);
        assert_eq!(out[0].intensity, 0.0);
        assert_eq!(out[1].intensity, 1.0);
        assert_eq!(out[2].intensity, 0.5);
    }

    #[test]
    fn test_range_spans_zero_to_one() {
        let points = vec![
            point(400.0, 380.0, None),
            point(350.0, 340.0, None),
            point(500.0, 480.0, None),
        ];
        let out = normalize(&points);
        let min = out.iter().map(|p| p.intensity).fold(f64::INFINITY, f64::min);
        let max = out
            .iter()
            .map(|p| p.intensity)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_uniform_batch_is_all_ones() {
        let points = vec![point(300.0, 280.0, None); 4];
        let out = normalize(&points);
        assert!(out.iter().all(|p| p.intensity == 1.0));
    }

    #[test]
    fn test_empty_batch() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_average_altitude_counts_missing_as_zero() {
        let processed = normalize(&[
            point(300.0, 280.0, Some(400.0)),
            point(320.0, 290.0, None),
        ]);
        assert_eq!(average_altitude(&processed), Some(200.0));
    }

    #[test]
    fn test_average_altitude_empty() {
        assert_eq!(average_altitude(&[]), None);
    }

    #[test]
    fn test_temperature_range() {
        let points = vec![point(320.0, 290.0, None), point(500.0, 250.0, None)];
        assert_eq!(temperature_range(&points), Some((250.0, 500.0)));
        assert_eq!(temperature_range(&[]), None);
    }
}
