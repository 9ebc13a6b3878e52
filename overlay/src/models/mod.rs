//! Core data types shared across the pipeline.

pub mod envelope;
pub mod gradient;
pub mod point;
pub mod time;

pub use envelope::ThermalResponse;
pub use gradient::{ColorMode, ColorRamp, ColorStop};
pub use point::{HeatPoint, OverlayMode, ProcessedThermalPoint, RawThermalPoint};
