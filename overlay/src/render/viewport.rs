//! Map viewport seam.

use parking_lot::Mutex;

use crate::config::RenderSettings;

/// A snapshot of the map view: zoom level and center latitude, the two
/// inputs the radius derivation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub center_lat: f64,
}

impl Viewport {
    /// Clamp the zoom into the configured bounds.
    pub fn clamped(self, settings: &RenderSettings) -> Self {
        Self {
            zoom: self.zoom.clamp(settings.min_zoom, settings.max_zoom),
            center_lat: self.center_lat,
        }
    }
}

/// Implemented by the map collaborator; queried on every render.
pub trait ViewportProvider: Send + Sync {
    fn viewport(&self) -> Viewport;
}

/// Settable viewport for tests and headless use.
pub struct FixedViewport {
    current: Mutex<Viewport>,
}

impl FixedViewport {
    pub fn new(zoom: f64, center_lat: f64) -> Self {
        Self {
            current: Mutex::new(Viewport { zoom, center_lat }),
        }
    }

    /// Simulate a zoom change.
    pub fn set_zoom(&self, zoom: f64) {
        self.current.lock().zoom = zoom;
    }
}

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> Viewport {
        *self.current.lock()
    }
}
