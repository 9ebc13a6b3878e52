//! Heat-layer rendering: viewport math, draw-parameter derivation, and the
//! renderer seam. No tiles and no DOM here — the map library stays behind
//! [`HeatRenderer`] and [`ViewportProvider`].

pub mod layer;
pub mod params;
pub mod throttle;
pub mod viewport;

pub use layer::{layer_bounds, HeatLayerOptions, HeatRenderer, LayerHandle, RecordingRenderer};
pub use params::{derive_render_params, intensity_cutoff, RenderParams};
pub use throttle::{Acquire, RenderThrottle};
pub use viewport::{FixedViewport, Viewport, ViewportProvider};
