//! HTTP client for the thermal telemetry endpoint.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::SourceSettings;
use crate::error::{OverlayError, OverlayResult};
use crate::models::{RawThermalPoint, ThermalResponse};

use super::ThermalSource;

/// reqwest-backed source hitting `GET {base_url}/api/thermal/{fireId}`.
#[derive(Debug, Clone)]
pub struct HttpThermalSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpThermalSource {
    /// Build a source from endpoint settings.
    pub fn new(settings: &SourceSettings) -> OverlayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_sec))
            .build()
            .map_err(|e| OverlayError::configuration(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn thermal_url(&self, fire_id: &str) -> String {
        format!("{}/api/thermal/{}", self.base_url, urlencode(fire_id))
    }
}

#[async_trait]
impl ThermalSource for HttpThermalSource {
    async fn fetch_thermal(
        &self,
        fire_id: &str,
        flight_id: Option<&str>,
    ) -> OverlayResult<Vec<RawThermalPoint>> {
        let mut request = self.client.get(self.thermal_url(fire_id));
        if let Some(flight) = flight_id {
            request = request.query(&[("flight_id", flight)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OverlayError::source(format!(
                "thermal endpoint returned {} for fire '{}'",
                status, fire_id
            )));
        }

        let envelope: ThermalResponse = response.json().await?;
        Ok(envelope.into_points())
    }
}

/// Percent-encode a path segment. Fire names come from user-facing pages
/// and routinely contain spaces.
fn urlencode(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode() {
        assert_eq!(urlencode("Caldor"), "Caldor");
        assert_eq!(urlencode("Tamarack Fire"), "Tamarack%20Fire");
        assert_eq!(urlencode("fire/1?x"), "fire%2F1%3Fx");
    }

    #[test]
    fn test_thermal_url_strips_trailing_slash() {
        let settings = SourceSettings {
            base_url: "http://gcs.local:8080/".to_string(),
            ..SourceSettings::default()
        };
        let source = HttpThermalSource::new(&settings).unwrap();
        assert_eq!(
            source.thermal_url("Caldor"),
            "http://gcs.local:8080/api/thermal/Caldor"
        );
    }
}
