//! Render-parameter derivation.
//!
//! The point radius is physical: the sensor sees a ground footprint of
//! `altitude * tan(fov/2)` meters, which Web-Mercator math converts to
//! screen pixels at the current zoom and latitude. Blur and opacity are
//! mode-dependent tuning on top of that.

use crate::config::RenderSettings;
use crate::models::OverlayMode;

use super::viewport::Viewport;

/// Web-Mercator meters-per-pixel numerator at zoom 0, equator.
const MERCATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

/// Draw parameters for one heat-layer frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    /// Point radius, pixels.
    pub radius: f64,
    /// Gaussian blur, pixels.
    pub blur: f64,
    /// Fixed intensity ceiling; `None` leaves scaling to the renderer's
    /// local extrema.
    pub max: Option<f64>,
    pub min_opacity: f64,
    pub use_local_extrema: bool,
}

/// Meters covered by one screen pixel at `zoom` around `center_lat`.
pub fn meters_per_pixel(zoom: f64, center_lat: f64) -> f64 {
    MERCATOR_METERS_PER_PIXEL * center_lat.to_radians().cos() / 2f64.powf(zoom)
}

/// Derive the frame parameters from the batch altitude and the viewport.
///
/// Returns `None` when the derived radius falls below the visible floor
/// (not expected given the clamp, but guarded); the caller skips the frame
/// instead of drawing a zero-size layer.
pub fn derive_render_params(
    avg_altitude: Option<f64>,
    viewport: Viewport,
    mode: OverlayMode,
    settings: &RenderSettings,
) -> Option<RenderParams> {
    let viewport = viewport.clamped(settings);

    let radius = match avg_altitude {
        None => settings.fallback_radius_px,
        Some(alt) if alt <= 0.0 => settings.fallback_radius_px,
        Some(alt) => {
            let ground_radius_m = alt * (settings.fov_deg / 2.0).to_radians().tan();
            let px = ground_radius_m / meters_per_pixel(viewport.zoom, viewport.center_lat);
            px.clamp(settings.min_radius_px, settings.max_radius_px)
        }
    };

    // NaN or a sub-visible radius skips the frame.
    if !(radius >= settings.min_radius_px.max(1.0)) {
        return None;
    }

    let params = match mode {
        OverlayMode::Fire => {
            let zoom_span = settings.max_zoom - settings.min_zoom;
            let zoom_fraction = if zoom_span > 0.0 {
                (viewport.zoom - settings.min_zoom) / zoom_span
            } else {
                1.0
            };
            // Soft diffuse blobs zoomed out, sharp heat edges zoomed in.
            let blur = (radius * 1.5 * (1.0 - zoom_fraction)).max(0.0);
            RenderParams {
                radius,
                blur,
                max: None,
                min_opacity: settings.fire_min_opacity,
                use_local_extrema: false,
            }
        }
        OverlayMode::Flight => RenderParams {
            radius,
            // Trajectories render as crisp dots, not diffuse blobs.
            blur: 0.0,
            max: Some(1.0),
            min_opacity: settings.flight_min_opacity,
            use_local_extrema: true,
        },
    };

    Some(params)
}

/// Mode-dependent intensity display cutoff: points below it are not handed
/// to the renderer.
pub fn intensity_cutoff(mode: OverlayMode, settings: &RenderSettings) -> f64 {
    match mode {
        OverlayMode::Fire => settings.fire_intensity_cutoff,
        OverlayMode::Flight => settings.flight_intensity_cutoff,
    }
}
