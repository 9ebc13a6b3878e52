//! Thermal point types.

use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that accepts either string or integer for the
/// nanosecond timestamp (the telemetry server has emitted both).
fn deserialize_time_stamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
        Float(f64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => s.parse::<i64>().map_err(D::Error::custom),
        StringOrInt::Int(i) => Ok(i),
        StringOrInt::Float(f) => Ok(f as i64),
    }
}

/// A raw point reading as received from the thermal endpoint.
///
/// Immutable once fetched; owned by the cache entry that produced it.
/// Temperatures are scene readings in an arbitrary unit that is consistent
/// within a batch. Altitude is sensor height above ground in meters and may
/// be absent or zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawThermalPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub high_temp: f64,
    pub low_temp: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Nanoseconds since epoch.
    #[serde(deserialize_with = "deserialize_time_stamp")]
    pub time_stamp: i64,
}

impl RawThermalPoint {
    /// Mean of the high/low scene readings, the value normalization ranks.
    pub fn avg_temp(&self) -> f64 {
        (self.high_temp + self.low_temp) / 2.0
    }
}

/// A point after deduplication and intensity normalization.
///
/// Produced fresh on every load/reprocess; a new batch replaces the
/// previous one, it is never merged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedThermalPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Normalized heat strength in [0, 1]; 1 is the hottest point of the
    /// current batch.
    pub intensity: f64,
    pub altitude: Option<f64>,
    /// Nanoseconds since epoch.
    pub time_stamp: i64,
}

impl ProcessedThermalPoint {
    /// The `[lat, lng, intensity]` triple the heat-layer renderer accepts.
    pub fn heat_point(&self) -> HeatPoint {
        [self.latitude, self.longitude, self.intensity]
    }
}

/// `[latitude, longitude, intensity]` as consumed by the heat renderer.
pub type HeatPoint = [f64; 3];

/// Which view the overlay is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    /// Sustained-area view of historical detections: spatially deduplicated,
    /// bounded to a trailing time window.
    Fire,
    /// Single bounded sensor-run trajectory: every point is meaningful,
    /// nothing is deduplicated or windowed.
    Flight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_temp() {
        let point = RawThermalPoint {
            latitude: 39.3,
            longitude: -119.8,
            high_temp: 320.0,
            low_temp: 290.0,
            altitude: Some(400.0),
            time_stamp: 100,
        };
        assert_eq!(point.avg_temp(), 305.0);
    }

    #[test]
    fn test_deserialize_integer_timestamp() {
        let json = r#"{
            "latitude": 39.3, "longitude": -119.8,
            "high_temp": 320.0, "low_temp": 290.0,
            "altitude": 400.0, "time_stamp": 1700000000000000000
        }"#;
        let point: RawThermalPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.time_stamp, 1_700_000_000_000_000_000);
        assert_eq!(point.altitude, Some(400.0));
    }

    #[test]
    fn test_deserialize_string_timestamp() {
        let json = r#"{
            "latitude": 39.3, "longitude": -119.8,
            "high_temp": 320.0, "low_temp": 290.0,
            "time_stamp": "1700000000000000000"
        }"#;
        let point: RawThermalPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.time_stamp, 1_700_000_000_000_000_000);
        assert_eq!(point.altitude, None);
    }

    #[test]
    fn test_deserialize_bad_timestamp() {
        let json = r#"{
            "latitude": 39.3, "longitude": -119.8,
            "high_temp": 320.0, "low_temp": 290.0,
            "time_stamp": "not-a-number"
        }"#;
        assert!(serde_json::from_str::<RawThermalPoint>(json).is_err());
    }

    #[test]
    fn test_heat_point() {
        let point = ProcessedThermalPoint {
            latitude: 39.3,
            longitude: -119.8,
            intensity: 0.5,
            altitude: None,
            time_stamp: 0,
        };
        assert_eq!(point.heat_point(), [39.3, -119.8, 0.5]);
    }
}
