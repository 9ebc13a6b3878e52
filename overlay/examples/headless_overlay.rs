//! Example driving the thermal overlay pipeline headlessly.
//!
//! This example shows how to:
//! 1. Seed an in-memory thermal source with a synthetic sensor pass
//! 2. Load and process the batch in fire mode
//! 3. Scrub the cutoff over the pass and watch the heat layer evolve
//!
//! To run this example:
//! ```bash
//! cargo run --example headless_overlay
//! ```

use std::sync::Arc;
use std::time::Duration;

use thermal_overlay::models::RawThermalPoint;
use thermal_overlay::render::{
    FixedViewport, HeatRenderer, RecordingRenderer, ViewportProvider,
};
use thermal_overlay::source::{InMemoryThermalSource, ThermalSource};
use thermal_overlay::{AnimationHandle, OverlayConfig, OverlayMode, ThermalOverlay};

const HOUR: i64 = 3_600 * 1_000_000_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Synthetic pass: a warm front moving north over six hours
    let source = Arc::new(InMemoryThermalSource::new());
    let points: Vec<RawThermalPoint> = (0..6)
        .map(|i| RawThermalPoint {
            latitude: 39.30 + f64::from(i) * 0.01,
            longitude: -119.80,
            high_temp: 300.0 + f64::from(i) * 10.0,
            low_temp: 280.0 + f64::from(i) * 10.0,
            altitude: Some(400.0),
            time_stamp: i64::from(i) * HOUR,
        })
        .collect();
    source.insert("demo-fire", None, points);

    let renderer = Arc::new(RecordingRenderer::new());
    let overlay = ThermalOverlay::new(
        OverlayMode::Fire,
        OverlayConfig::default(),
        Arc::clone(&source) as Arc<dyn ThermalSource>,
        Arc::clone(&renderer) as Arc<dyn HeatRenderer>,
        Arc::new(FixedViewport::new(12.0, 39.3)) as Arc<dyn ViewportProvider>,
    );

    let loaded = overlay.load_thermal_data("demo-fire", None, None).await?;
    println!("Loaded {} processed points", loaded.len());
    if let Some((low, high)) = overlay.temperature_range() {
        println!("Scene temperatures: {low:.1} to {high:.1}");
    }

    let handle = AnimationHandle::new();
    overlay
        .animate_over_time(
            "demo-fire",
            0,
            6 * HOUR,
            Duration::from_secs(3_600),
            &handle,
            |cutoff, index, total| {
                println!(
                    "step {}/{} cutoff={}h points={}",
                    index + 1,
                    total,
                    cutoff / HOUR,
                    overlay.points().len()
                );
            },
        )
        .await?;

    println!("Renderer saw {} draw calls", renderer.draw_count());
    Ok(())
}
