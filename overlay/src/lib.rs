//! # Thermal Overlay Core
//!
//! Data pipeline behind the wildfire thermal heat layer: fetch raw sensor
//! readings for a fire (optionally scoped to a flight and a point-in-time
//! cutoff), deduplicate overlapping passes, normalize per-point intensity,
//! and derive the heat-layer draw parameters from sensor altitude and the
//! current map viewport.
//!
//! ## Architecture
//!
//! - [`models`]: point types, response envelope, color ramps, time helpers
//! - [`source`]: the thermal endpoint seam ([`source::ThermalSource`]) and
//!   the per-`(fire, flight)` raw-point cache
//! - [`processing`]: cutoff/window filtering, spatial dedup, normalization
//! - [`render`]: viewport math, render-parameter derivation, draw throttle,
//!   and the heat-layer renderer seam
//! - [`overlay`]: the [`overlay::ThermalOverlay`] orchestrator, one instance
//!   per map view
//! - [`animate`]: the time-scrub animation driver
//!
//! Map tiles, timeline drawing, and DOM wiring are collaborators, not part
//! of this crate: the map supplies a [`render::ViewportProvider`] and a
//! [`render::HeatRenderer`], and everything else flows through the pipeline.

pub mod animate;
pub mod config;
pub mod error;
pub mod models;
pub mod overlay;
pub mod processing;
pub mod render;
pub mod source;

pub use animate::AnimationHandle;
pub use config::OverlayConfig;
pub use error::{OverlayError, OverlayResult};
pub use models::{ColorMode, OverlayMode, ProcessedThermalPoint, RawThermalPoint};
pub use overlay::{RenderOptions, ThermalOverlay};
