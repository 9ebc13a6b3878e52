//! Property-based checks over the pure pipeline stages.

use proptest::prelude::*;

use thermal_overlay::config::RenderSettings;
use thermal_overlay::models::RawThermalPoint;
use thermal_overlay::processing::{dedupe, filter_by_cutoff, normalize};
use thermal_overlay::render::{derive_render_params, Viewport};
use thermal_overlay::OverlayMode;

const HOUR: i64 = 3_600 * 1_000_000_000;

fn arb_point() -> impl Strategy<Value = RawThermalPoint> {
    (
        -60.0f64..60.0,
        -170.0f64..170.0,
        200.0f64..700.0,
        0.0f64..200.0,
        prop::option::of(0.0f64..5_000.0),
        0i64..(1_000 * HOUR),
    )
        .prop_map(|(lat, lon, high, low_delta, altitude, ts)| RawThermalPoint {
            latitude: lat,
            longitude: lon,
            high_temp: high,
            low_temp: high - low_delta,
            altitude,
            time_stamp: ts,
        })
}

proptest! {
    #[test]
    fn normalized_intensities_stay_in_unit_range(
        points in prop::collection::vec(arb_point(), 1..64)
    ) {
        let out = normalize(&points);
        prop_assert_eq!(out.len(), points.len());
        for p in &out {
            prop_assert!((0.0..=1.0).contains(&p.intensity));
        }
    }

    #[test]
    fn batch_with_distinct_averages_spans_zero_to_one(
        points in prop::collection::vec(arb_point(), 2..64)
    ) {
        let first = points[0].avg_temp();
        prop_assume!(points.iter().any(|p| p.avg_temp() != first));

        let out = normalize(&points);
        let min = out.iter().map(|p| p.intensity).fold(f64::INFINITY, f64::min);
        let max = out.iter().map(|p| p.intensity).fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(min, 0.0);
        prop_assert_eq!(max, 1.0);
    }

    #[test]
    fn uniform_batch_normalizes_to_all_ones(
        template in arb_point(),
        count in 1usize..32
    ) {
        let points = vec![template; count];
        let out = normalize(&points);
        prop_assert!(out.iter().all(|p| p.intensity == 1.0));
    }

    #[test]
    fn fire_dedupe_never_grows_the_batch(
        points in prop::collection::vec(arb_point(), 0..64)
    ) {
        let out = dedupe(&points, OverlayMode::Fire, 150.0);
        prop_assert!(out.len() <= points.len());
    }

    #[test]
    fn fire_dedupe_keeps_at_most_one_point_per_bucket(
        points in prop::collection::vec(arb_point(), 0..64)
    ) {
        let out = dedupe(&points, OverlayMode::Fire, 150.0);

        let bucket_lat = 150.0 / 111_320.0;
        let mut keys = std::collections::HashSet::new();
        for p in &out {
            let key_lat = (p.latitude / bucket_lat).floor() as i64;
            let bucket_lon = 150.0 / (111_320.0 * p.latitude.to_radians().cos());
            let key_lon = (p.longitude / bucket_lon).floor() as i64;
            prop_assert!(keys.insert((key_lat, key_lon)));
        }
    }

    #[test]
    fn flight_dedupe_is_identity(
        points in prop::collection::vec(arb_point(), 0..64)
    ) {
        let out = dedupe(&points, OverlayMode::Flight, 150.0);
        prop_assert_eq!(out, points);
    }

    #[test]
    fn cutoff_is_monotone_without_a_window(
        points in prop::collection::vec(arb_point(), 0..64),
        t1 in 0i64..(1_000 * HOUR),
        t2 in 0i64..(1_000 * HOUR),
    ) {
        let (t1, t2) = (t1.min(t2), t1.max(t2));
        let early = filter_by_cutoff(&points, Some(t1), OverlayMode::Flight, 24 * HOUR);
        let late = filter_by_cutoff(&points, Some(t2), OverlayMode::Flight, 24 * HOUR);

        for p in &early {
            prop_assert!(late.contains(p));
        }
    }

    #[test]
    fn fire_cutoff_bounds_the_trailing_window(
        points in prop::collection::vec(arb_point(), 0..64),
        cutoff in 0i64..(1_000 * HOUR),
    ) {
        let window = 24 * HOUR;
        let kept = filter_by_cutoff(&points, Some(cutoff), OverlayMode::Fire, window);
        for p in &kept {
            prop_assert!(p.time_stamp <= cutoff);
            prop_assert!(p.time_stamp >= cutoff.saturating_sub(window));
        }
    }

    #[test]
    fn derived_radius_respects_the_clamp(
        altitude in 0.0f64..100_000.0,
        zoom in 5.0f64..=18.0,
        center_lat in -85.0f64..85.0,
    ) {
        let settings = RenderSettings::default();
        let params = derive_render_params(
            Some(altitude),
            Viewport { zoom, center_lat },
            OverlayMode::Fire,
            &settings,
        )
        .expect("radius within clamp bounds must render");

        if altitude > 0.0 {
            prop_assert!((1.0..=50.0).contains(&params.radius));
        } else {
            prop_assert_eq!(params.radius, 25.0);
        }
        prop_assert!(params.blur >= 0.0);
    }
}
