//! Thermal data sources.
//!
//! The endpoint is a collaborator with a fixed response shape, so the seam
//! is a small async trait: the HTTP client implements it for production and
//! the in-memory source backs tests and local development.

pub mod cache;
#[cfg(feature = "http-source")]
pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::error::OverlayResult;
use crate::models::RawThermalPoint;

pub use cache::{CacheKey, RawPointCache};
#[cfg(feature = "http-source")]
pub use http::HttpThermalSource;
pub use memory::InMemoryThermalSource;

/// A provider of raw thermal points for a named fire, optionally scoped to
/// a single flight.
#[async_trait]
pub trait ThermalSource: Send + Sync {
    /// Fetch every raw point for `(fire_id, flight_id)`.
    ///
    /// Transport and decode failures are errors here; the cache layer above
    /// degrades them to an empty batch.
    async fn fetch_thermal(
        &self,
        fire_id: &str,
        flight_id: Option<&str>,
    ) -> OverlayResult<Vec<RawThermalPoint>>;
}
