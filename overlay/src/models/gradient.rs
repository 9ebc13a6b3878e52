//! Color ramps for the heat layer.

use serde::{Deserialize, Serialize};

/// Named color-ramp presets the UI can switch between. Switching the mode
/// swaps the ramp only; it never refetches data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Standard,
    Intensity,
    Accessibility,
}

/// One gradient stop: normalized position in [0, 1] and a CSS color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub stop: f64,
    pub color: String,
}

impl ColorStop {
    fn new(stop: f64, color: &str) -> Self {
        Self {
            stop,
            color: color.to_string(),
        }
    }
}

/// An ordered list of gradient stops, as the heat renderer consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    pub stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// The ramp the overlay starts with: transparent-to-red rgba stops so
    /// low intensities fade out instead of painting the map blue.
    pub fn default_ramp() -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0, "rgba(0,0,255,0)"),
                ColorStop::new(0.4, "rgba(0,0,255,0.2)"),
                ColorStop::new(0.6, "rgba(0,255,0,0.4)"),
                ColorStop::new(0.8, "rgba(255,255,0,0.7)"),
                ColorStop::new(1.0, "rgba(255,0,0,1)"),
            ],
        }
    }

    /// Ramp for a named color mode.
    pub fn for_mode(mode: ColorMode) -> Self {
        let stops = match mode {
            ColorMode::Standard => vec![
                ColorStop::new(0.4, "blue"),
                ColorStop::new(0.6, "lime"),
                ColorStop::new(0.7, "yellow"),
                ColorStop::new(0.8, "orange"),
                ColorStop::new(1.0, "red"),
            ],
            ColorMode::Intensity => vec![
                ColorStop::new(0.0, "transparent"),
                ColorStop::new(0.2, "purple"),
                ColorStop::new(0.4, "blue"),
                ColorStop::new(0.6, "green"),
                ColorStop::new(0.8, "yellow"),
                ColorStop::new(1.0, "red"),
            ],
            // Colorblind-safe diverging palette
            ColorMode::Accessibility => vec![
                ColorStop::new(0.0, "#313695"),
                ColorStop::new(0.2, "#4575b4"),
                ColorStop::new(0.4, "#74add1"),
                ColorStop::new(0.6, "#abd9e9"),
                ColorStop::new(0.8, "#fdae61"),
                ColorStop::new(1.0, "#d73027"),
            ],
        };
        Self { stops }
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::default_ramp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_are_sorted_and_bounded() {
        for ramp in [
            ColorRamp::default_ramp(),
            ColorRamp::for_mode(ColorMode::Standard),
            ColorRamp::for_mode(ColorMode::Intensity),
            ColorRamp::for_mode(ColorMode::Accessibility),
        ] {
            for pair in ramp.stops.windows(2) {
                assert!(pair[0].stop < pair[1].stop);
            }
            let last = ramp.stops.last().unwrap();
            assert_eq!(last.stop, 1.0);
        }
    }

    #[test]
    fn test_mode_selects_distinct_ramps() {
        let standard = ColorRamp::for_mode(ColorMode::Standard);
        let accessible = ColorRamp::for_mode(ColorMode::Accessibility);
        assert_ne!(standard, accessible);
        assert_eq!(accessible.stops[0].color, "#313695");
    }
}
