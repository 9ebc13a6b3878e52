//! The overlay orchestrator.
//!
//! One [`ThermalOverlay`] instance per map view owns the raw-point cache,
//! the current processed batch, the color ramp, and the draw throttle.
//! There is no process-wide state: two maps on one page are two overlays.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::OverlayConfig;
use crate::error::{OverlayError, OverlayResult};
use crate::models::{ColorMode, ColorRamp, HeatPoint, OverlayMode, ProcessedThermalPoint};
use crate::processing::{ProcessRequest, ProcessedBatch};
use crate::render::{
    derive_render_params, intensity_cutoff, layer_bounds, Acquire, HeatLayerOptions,
    HeatRenderer, LayerHandle, RenderThrottle, ViewportProvider,
};
use crate::source::{CacheKey, RawPointCache, ThermalSource};

/// Options for one render call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Fit the map view to the drawn points.
    pub fit_bounds: bool,
}

/// Outcome of one render attempt.
enum RenderOutcome {
    /// The frame was drawn, or the layer was cleared (`None`).
    Drawn(Option<LayerHandle>),
    /// The draw token is spent; retry after this long.
    Throttled { retry_in: Duration },
}

/// Mutable per-overlay state, behind one lock.
struct OverlayState {
    batch: ProcessedBatch,
    gradient: ColorRamp,
    layer: Option<LayerHandle>,
}

/// Thermal heat-layer pipeline for a single map view.
pub struct ThermalOverlay {
    mode: OverlayMode,
    config: OverlayConfig,
    source: Arc<dyn ThermalSource>,
    renderer: Arc<dyn HeatRenderer>,
    viewport: Arc<dyn ViewportProvider>,
    cache: RawPointCache,
    throttle: RenderThrottle,
    /// Monotonic reprocessing generation; a commit is discarded when a
    /// newer load has started since it was issued, so a slow recomputation
    /// can never draw an old cutoff over a newer one.
    generation: AtomicU64,
    state: Mutex<OverlayState>,
}

impl ThermalOverlay {
    pub fn new(
        mode: OverlayMode,
        config: OverlayConfig,
        source: Arc<dyn ThermalSource>,
        renderer: Arc<dyn HeatRenderer>,
        viewport: Arc<dyn ViewportProvider>,
    ) -> Self {
        let cache = RawPointCache::new(config.source.min_high_temp);
        let throttle = RenderThrottle::new(Duration::from_millis(config.render.render_interval_ms));
        Self {
            mode,
            config,
            source,
            renderer,
            viewport,
            cache,
            throttle,
            generation: AtomicU64::new(0),
            state: Mutex::new(OverlayState {
                batch: ProcessedBatch::empty(),
                gradient: ColorRamp::default_ramp(),
                layer: None,
            }),
        }
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Load and process thermal points for a fire at an optional cutoff.
    ///
    /// The raw batch is fetched once per `(fire_id, flight_id)` and cached,
    /// so scrubbing the cutoff reprocesses in memory. Processing runs on a
    /// blocking worker; if a newer load starts before this one commits, the
    /// stale result is returned to the caller but neither stored nor
    /// rendered.
    pub async fn load_thermal_data(
        &self,
        fire_id: &str,
        cutoff: Option<i64>,
        flight_id: Option<&str>,
    ) -> OverlayResult<Vec<ProcessedThermalPoint>> {
        let raw = self
            .cache
            .get_or_fetch(self.source.as_ref(), fire_id, flight_id)
            .await;

        let generation = self.next_generation();
        let request = ProcessRequest {
            raw,
            mode: self.mode,
            cutoff,
            window_nanos: self.config.processing.recent_window_nanos(),
            bucket_meters: self.config.processing.bucket_meters,
        };

        let batch = tokio::task::spawn_blocking(move || request.run())
            .await
            .map_err(|e| OverlayError::internal(format!("processing task failed: {}", e)))?;

        let points = batch.points.clone();
        if self.commit_if_current(generation, batch) {
            self.render_trailing(generation).await;
        } else {
            log::debug!(
                "Discarding superseded thermal batch for fire '{}' (generation {})",
                fire_id,
                generation
            );
        }

        Ok(points)
    }

    /// Draw the current batch, replacing any previous layer.
    ///
    /// Throttled: at most one actual draw per configured interval; refused
    /// calls return the handle of the layer already on the map. An empty
    /// batch or a degenerate radius clears the previous layer and draws
    /// nothing — clearing is not a draw, so it always takes effect even
    /// when the draw token is spent.
    pub fn render(&self, options: RenderOptions) -> Option<LayerHandle> {
        match self.try_render(options) {
            RenderOutcome::Drawn(handle) => handle,
            RenderOutcome::Throttled { .. } => self.state.lock().layer,
        }
    }

    /// Render after a commit, retrying once past the throttle interval so
    /// the last step of a rapid scrub still reaches the map. The retry is
    /// skipped when a newer load has started meanwhile.
    async fn render_trailing(&self, generation: u64) {
        let retry_in = match self.try_render(RenderOptions::default()) {
            RenderOutcome::Drawn(_) => return,
            RenderOutcome::Throttled { retry_in } => retry_in,
        };

        tokio::time::sleep(retry_in).await;
        if self.generation.load(Ordering::SeqCst) == generation {
            let _ = self.try_render(RenderOptions::default());
        }
    }

    fn try_render(&self, options: RenderOptions) -> RenderOutcome {
        let mut state = self.state.lock();

        if state.batch.points.is_empty() {
            log::warn!("No thermal points to render; clearing heat layer");
            Self::remove_layer(&self.renderer, &mut state);
            self.throttle.reset();
            return RenderOutcome::Drawn(None);
        }

        let cutoff = intensity_cutoff(self.mode, &self.config.render);
        let heat_data: Vec<HeatPoint> = state
            .batch
            .points
            .iter()
            .filter(|p| p.intensity >= cutoff)
            .map(ProcessedThermalPoint::heat_point)
            .collect();

        if heat_data.is_empty() {
            Self::remove_layer(&self.renderer, &mut state);
            self.throttle.reset();
            return RenderOutcome::Drawn(None);
        }

        let Some(params) = derive_render_params(
            state.batch.avg_altitude,
            self.viewport.viewport(),
            self.mode,
            &self.config.render,
        ) else {
            // Sub-visible radius: skip the frame rather than draw a
            // zero-size layer. The previous layer stays removed.
            Self::remove_layer(&self.renderer, &mut state);
            self.throttle.reset();
            return RenderOutcome::Drawn(None);
        };

        if let Acquire::Wait(retry_in) = self.throttle.acquire() {
            return RenderOutcome::Throttled { retry_in };
        }

        Self::remove_layer(&self.renderer, &mut state);
        let layer_options = HeatLayerOptions::new(params, state.gradient.clone());
        let handle = self.renderer.draw(&heat_data, &layer_options);
        state.layer = Some(handle);

        if options.fit_bounds {
            if let Some((south_west, north_east)) = layer_bounds(&heat_data) {
                self.renderer.fit_bounds(south_west, north_east);
            }
        }

        RenderOutcome::Drawn(Some(handle))
    }

    /// Zoom changed: recompute the render parameters and redraw. No
    /// refetch, no re-dedup, no suspension.
    pub fn handle_zoom_change(&self) {
        if self.state.lock().layer.is_some() {
            self.render(RenderOptions::default());
        }
    }

    /// Swap the color ramp. Updates the live layer in place; does not
    /// refetch or reprocess.
    pub fn set_color_mode(&self, mode: ColorMode) {
        let mut state = self.state.lock();
        state.gradient = ColorRamp::for_mode(mode);
        if let Some(layer) = state.layer {
            self.renderer.set_gradient(layer, &state.gradient);
        }
    }

    /// Drop the cached raw batch for one `(fire_id, flight_id)` so the next
    /// load refetches. Switching fires or flights goes through here.
    pub fn invalidate(&self, fire_id: &str, flight_id: Option<&str>) {
        self.cache.invalidate(&CacheKey::new(fire_id, flight_id));
    }

    /// Drop every cached raw batch.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Current processed points.
    pub fn points(&self) -> Vec<ProcessedThermalPoint> {
        self.state.lock().batch.points.clone()
    }

    /// Mean sensor altitude of the current batch.
    pub fn avg_altitude(&self) -> Option<f64> {
        self.state.lock().batch.avg_altitude
    }

    /// Batch-wide (min, max) scene temperature for UI readouts.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.state.lock().batch.temperature_range
    }

    /// Handle of the layer currently on the map.
    pub fn current_layer(&self) -> Option<LayerHandle> {
        self.state.lock().layer
    }

    fn remove_layer(renderer: &Arc<dyn HeatRenderer>, state: &mut OverlayState) {
        if let Some(layer) = state.layer.take() {
            renderer.remove(layer);
        }
    }

    pub(crate) fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Store the batch unless a newer load has started since `generation`
    /// was issued. Returns whether the batch was committed.
    pub(crate) fn commit_if_current(&self, generation: u64, batch: ProcessedBatch) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        self.state.lock().batch = batch;
        true
    }
}
