//! Overlay configuration file support.
//!
//! All the hand-tuned pipeline constants (temperature floor, recent-window
//! duration, bucket size, field of view, zoom bounds, display cutoffs,
//! throttle intervals) live here as configuration rather than magic numbers
//! scattered through the pipeline. Values can be overridden from a TOML
//! file; every field has a deployment-tested default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OverlayError, OverlayResult};

/// Top-level overlay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub processing: ProcessingSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
}

/// Thermal endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Base URL of the telemetry server, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
    /// Readings with `high_temp` below this are discarded as sensor noise
    /// before caching.
    #[serde(default = "default_min_high_temp")]
    pub min_high_temp: f64,
}

/// Filtering and deduplication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Fire-mode trailing window: points older than `cutoff - window` are
    /// dropped so old cold readings cannot pollute the heat layer.
    #[serde(default = "default_recent_window_hours")]
    pub recent_window_hours: u64,
    /// Ground size of a deduplication bucket, meters.
    #[serde(default = "default_bucket_meters")]
    pub bucket_meters: f64,
}

/// Heat-layer rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Vertical sensor field of view, degrees.
    #[serde(default = "default_fov_deg")]
    pub fov_deg: f64,
    /// Radius used when the batch carries no altitude data, pixels.
    #[serde(default = "default_fallback_radius_px")]
    pub fallback_radius_px: f64,
    /// Derived radius clamp bounds, pixels.
    #[serde(default = "default_min_radius_px")]
    pub min_radius_px: f64,
    #[serde(default = "default_max_radius_px")]
    pub max_radius_px: f64,
    /// Map zoom bounds the viewport is clamped to.
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    /// Intensity display cutoffs: points below are not handed to the
    /// renderer. Fire suppresses visually insignificant cold points; flight
    /// shows the whole trajectory.
    #[serde(default = "default_fire_cutoff")]
    pub fire_intensity_cutoff: f64,
    #[serde(default = "default_flight_cutoff")]
    pub flight_intensity_cutoff: f64,
    #[serde(default = "default_fire_min_opacity")]
    pub fire_min_opacity: f64,
    #[serde(default = "default_flight_min_opacity")]
    pub flight_min_opacity: f64,
    /// Minimum interval between actual draws, milliseconds.
    #[serde(default = "default_render_interval_ms")]
    pub render_interval_ms: u64,
}

/// Time-scrub animation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationSettings {
    /// Pause between animation steps, milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_min_high_temp() -> f64 {
    200.0
}

fn default_recent_window_hours() -> u64 {
    24
}

fn default_bucket_meters() -> f64 {
    150.0
}

fn default_fov_deg() -> f64 {
    55.0
}

fn default_fallback_radius_px() -> f64 {
    25.0
}

fn default_min_radius_px() -> f64 {
    1.0
}

fn default_max_radius_px() -> f64 {
    50.0
}

fn default_min_zoom() -> f64 {
    5.0
}

fn default_max_zoom() -> f64 {
    18.0
}

fn default_fire_cutoff() -> f64 {
    0.20
}

fn default_flight_cutoff() -> f64 {
    0.0
}

fn default_fire_min_opacity() -> f64 {
    0.35
}

fn default_flight_min_opacity() -> f64 {
    0.5
}

fn default_render_interval_ms() -> u64 {
    200
}

fn default_step_delay_ms() -> u64 {
    200
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_sec: default_request_timeout(),
            min_high_temp: default_min_high_temp(),
        }
    }
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            recent_window_hours: default_recent_window_hours(),
            bucket_meters: default_bucket_meters(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fov_deg: default_fov_deg(),
            fallback_radius_px: default_fallback_radius_px(),
            min_radius_px: default_min_radius_px(),
            max_radius_px: default_max_radius_px(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            fire_intensity_cutoff: default_fire_cutoff(),
            flight_intensity_cutoff: default_flight_cutoff(),
            fire_min_opacity: default_fire_min_opacity(),
            flight_min_opacity: default_flight_min_opacity(),
            render_interval_ms: default_render_interval_ms(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

impl ProcessingSettings {
    /// Recent-window duration in nanoseconds, the unit point timestamps use.
    pub fn recent_window_nanos(&self) -> i64 {
        self.recent_window_hours as i64 * 3_600 * 1_000_000_000
    }
}

impl OverlayConfig {
    /// Load overlay configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> OverlayResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            OverlayError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: OverlayConfig = toml::from_str(&content).map_err(|e| {
            OverlayError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load overlay configuration from the default location.
    ///
    /// Searches for `overlay.toml` in the current directory, then the
    /// parent directory. Falls back to built-in defaults when no file
    /// exists anywhere.
    pub fn from_default_location() -> Self {
        let search_paths = [
            PathBuf::from("overlay.toml"),
            PathBuf::from("../overlay.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        log::warn!("Ignoring unreadable {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }
}
