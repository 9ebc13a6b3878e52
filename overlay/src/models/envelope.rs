//! Response envelope for the thermal endpoint.
//!
//! The server has shipped two response shapes over time: a bare JSON array
//! of points, and an object wrapping the same array under `wildfire_data`.
//! Both are accepted here, at the boundary, and normalized into one
//! internal type before anything enters the pipeline.

use serde::Deserialize;

use super::point::RawThermalPoint;

/// The two accepted response shapes of `GET /api/thermal/{fireId}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ThermalResponse {
    /// Bare array of points.
    Points(Vec<RawThermalPoint>),
    /// Object envelope: `{"wildfire_data": [...]}`.
    Envelope { wildfire_data: Vec<RawThermalPoint> },
}

impl ThermalResponse {
    /// Collapse either shape into the point list.
    pub fn into_points(self) -> Vec<RawThermalPoint> {
        match self {
            ThermalResponse::Points(points) => points,
            ThermalResponse::Envelope { wildfire_data } => wildfire_data,
        }
    }
}
