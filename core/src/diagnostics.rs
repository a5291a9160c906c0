//! Optional per-image diagnostics
//!
//! The measurement never depends on diagnostics; the task hands them to a
//! [`DiagnosticSink`] only when reporting is enabled.

use crate::error::Result;
use crate::measurement::SliceMeasurement;
use crate::types::PixelSpacing;
use std::path::PathBuf;

/// Intermediate values of one slice measurement
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics<'a> {
    /// Description of the measured image
    pub description: &'a str,

    /// In-plane resolution of the image
    pub spacing: PixelSpacing,

    /// Upsampling factor used by the matcher
    pub interp_factor: usize,

    /// Wedge window, profiles and shift search result
    pub measurement: &'a SliceMeasurement,
}

impl Diagnostics<'_> {
    /// Position along the upsampled profiles in mm, starting one step in
    pub fn positions_mm(&self) -> Vec<f64> {
        let step = self.spacing.y() / self.interp_factor.max(1) as f64;
        (1..=self.measurement.matched.left.len())
            .map(|i| i as f64 * step)
            .collect()
    }
}

/// Receives diagnostics and returns the path of what it produced
pub trait DiagnosticSink {
    fn record(&self, diagnostics: &Diagnostics<'_>) -> Result<PathBuf>;
}

/// Writes one `<description>.json` file per image into a directory
#[cfg(feature = "json")]
#[derive(Debug, Clone)]
pub struct JsonDiagnostics {
    dir: PathBuf,
}

#[cfg(feature = "json")]
impl JsonDiagnostics {
    /// Creates the sink, making `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

#[cfg(feature = "json")]
impl DiagnosticSink for JsonDiagnostics {
    fn record(&self, diagnostics: &Diagnostics<'_>) -> Result<PathBuf> {
        use serde::Serialize;

        #[derive(Serialize)]
        struct DiagnosticsJson<'a> {
            image: &'a str,
            pixel_spacing: PixelSpacing,
            window: crate::types::WedgeWindow,
            left_profile: &'a [f64],
            right_profile: &'a [f64],
            position_mm: Vec<f64>,
            interp_left: &'a [f64],
            interp_right: &'a [f64],
            roi: [usize; 2],
            lag: isize,
            shift: isize,
            sign: i8,
            length_difference: f64,
        }

        let m = diagnostics.measurement;
        let json = DiagnosticsJson {
            image: diagnostics.description,
            pixel_spacing: diagnostics.spacing,
            window: m.window,
            left_profile: &m.left_profile,
            right_profile: &m.right_profile,
            position_mm: diagnostics.positions_mm(),
            interp_left: &m.matched.left,
            interp_right: &m.matched.right,
            roi: [m.matched.roi.start, m.matched.roi.end],
            lag: m.matched.lag,
            shift: m.matched.shift,
            sign: m.matched.sign,
            length_difference: m.matched.length_difference,
        };

        let path = self.dir.join(format!("{}.json", diagnostics.description));
        let text = serde_json::to_string_pretty(&json)?;
        std::fs::write(&path, text)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::ShiftMatch;
    use crate::types::WedgeWindow;

    fn measurement() -> SliceMeasurement {
        SliceMeasurement {
            window: WedgeWindow::new(112, 136, 29, 67),
            left_profile: vec![10.0, 100.0],
            right_profile: vec![10.0, 10.0],
            matched: ShiftMatch {
                length_difference: 1.0,
                lag: 5,
                shift: -5,
                sign: 1,
                roi: 0..6,
                left: vec![10.0, 28.0, 46.0, 64.0, 82.0, 100.0],
                right: vec![10.0; 6],
            },
        }
    }

    #[test]
    fn test_positions_follow_row_spacing() {
        let m = measurement();
        let diagnostics = Diagnostics {
            description: "ACR_1_1",
            spacing: PixelSpacing::isotropic(0.5),
            interp_factor: 5,
            measurement: &m,
        };
        let positions = diagnostics.positions_mm();
        assert_eq!(positions.len(), 6);
        assert!((positions[0] - 0.1).abs() < 1e-12);
        assert!((positions[5] - 0.6).abs() < 1e-12);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_diagnostics_written() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let sink = JsonDiagnostics::new(temp_dir.path().join("report")).unwrap();
        let m = measurement();
        let diagnostics = Diagnostics {
            description: "ACR_1_1",
            spacing: PixelSpacing::isotropic(1.0),
            interp_factor: 5,
            measurement: &m,
        };

        let path = sink.record(&diagnostics).unwrap();
        assert!(path.ends_with("ACR_1_1.json"));
        let text = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["lag"], 5);
        assert_eq!(value["window"]["x_left"], 112);
    }
}
