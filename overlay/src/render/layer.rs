//! Heat-layer renderer seam.
//!
//! The actual heat layer belongs to the map library; this crate only hands
//! it a point list and a parameter bag and asks it to replace the previous
//! layer. [`RecordingRenderer`] captures those calls for tests and headless
//! runs.

use parking_lot::Mutex;
use serde::Serialize;

use crate::models::{ColorRamp, HeatPoint};

use super::params::RenderParams;

/// Opaque handle to a drawn layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u64);

/// The full parameter bag a heat-layer draw accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatLayerOptions {
    pub radius: f64,
    pub blur: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub min_opacity: f64,
    pub gradient: ColorRamp,
    pub use_local_extrema: bool,
    /// Always false: the radius is already derived in pixels, the renderer
    /// must not rescale it per zoom.
    pub scale_radius: bool,
}

impl HeatLayerOptions {
    pub fn new(params: RenderParams, gradient: ColorRamp) -> Self {
        Self {
            radius: params.radius,
            blur: params.blur,
            max: params.max,
            min_opacity: params.min_opacity,
            gradient,
            use_local_extrema: params.use_local_extrema,
            scale_radius: false,
        }
    }
}

/// External heat-layer renderer collaborator.
pub trait HeatRenderer: Send + Sync {
    /// Draw a new layer from `[lat, lng, intensity]` triples.
    fn draw(&self, points: &[HeatPoint], options: &HeatLayerOptions) -> LayerHandle;

    /// Remove a previously drawn layer. Removing an already-removed handle
    /// is a no-op.
    fn remove(&self, handle: LayerHandle);

    /// Swap the gradient of a live layer without redrawing its points.
    fn set_gradient(&self, handle: LayerHandle, gradient: &ColorRamp);

    /// Fit the map view to a bounding box: `[south, west]`, `[north, east]`.
    fn fit_bounds(&self, south_west: [f64; 2], north_east: [f64; 2]);
}

/// Bounding box of a point list, for the fit-bounds render option.
pub fn layer_bounds(points: &[HeatPoint]) -> Option<([f64; 2], [f64; 2])> {
    if points.is_empty() {
        return None;
    }
    let mut south = f64::INFINITY;
    let mut west = f64::INFINITY;
    let mut north = f64::NEG_INFINITY;
    let mut east = f64::NEG_INFINITY;
    for p in points {
        south = south.min(p[0]);
        north = north.max(p[0]);
        west = west.min(p[1]);
        east = east.max(p[1]);
    }
    Some(([south, west], [north, east]))
}

/// One recorded draw call.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub handle: LayerHandle,
    pub points: Vec<HeatPoint>,
    pub options: HeatLayerOptions,
}

#[derive(Default)]
struct RecorderState {
    next_id: u64,
    draws: Vec<DrawCall>,
    removed: Vec<LayerHandle>,
    gradient_updates: Vec<(LayerHandle, ColorRamp)>,
    fitted_bounds: Vec<([f64; 2], [f64; 2])>,
}

/// Renderer double that records every call.
#[derive(Default)]
pub struct RecordingRenderer {
    state: Mutex<RecorderState>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_count(&self) -> usize {
        self.state.lock().draws.len()
    }

    pub fn last_draw(&self) -> Option<DrawCall> {
        self.state.lock().draws.last().cloned()
    }

    pub fn removed(&self) -> Vec<LayerHandle> {
        self.state.lock().removed.clone()
    }

    pub fn gradient_updates(&self) -> Vec<(LayerHandle, ColorRamp)> {
        self.state.lock().gradient_updates.clone()
    }

    pub fn fitted_bounds(&self) -> Vec<([f64; 2], [f64; 2])> {
        self.state.lock().fitted_bounds.clone()
    }
}

impl HeatRenderer for RecordingRenderer {
    fn draw(&self, points: &[HeatPoint], options: &HeatLayerOptions) -> LayerHandle {
        let mut state = self.state.lock();
        state.next_id += 1;
        let handle = LayerHandle(state.next_id);
        state.draws.push(DrawCall {
            handle,
            points: points.to_vec(),
            options: options.clone(),
        });
        handle
    }

    fn remove(&self, handle: LayerHandle) {
        self.state.lock().removed.push(handle);
    }

    fn set_gradient(&self, handle: LayerHandle, gradient: &ColorRamp) {
        self.state
            .lock()
            .gradient_updates
            .push((handle, gradient.clone()));
    }

    fn fit_bounds(&self, south_west: [f64; 2], north_east: [f64; 2]) {
        self.state.lock().fitted_bounds.push((south_west, north_east));
    }
}
