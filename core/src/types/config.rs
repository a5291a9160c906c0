use crate::types::PhantomSize;
use std::path::PathBuf;

/// Configuration for a slice position measurement run
///
/// # Example
///
/// ```
/// use slicepos_core::{MeasurementConfig, PhantomSize};
///
/// let config = MeasurementConfig::default()
///     .with_phantom_size(PhantomSize::Medium)
///     .with_report_dir("reports");
///
/// assert_eq!(config.phantom_size, PhantomSize::Medium);
/// assert!(config.report);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementConfig {
    /// Phantom model, selects the wedge geometry
    pub phantom_size: PhantomSize,

    /// Produce diagnostics for each measured image
    pub report: bool,

    /// Where diagnostics are written when `report` is set
    pub report_dir: Option<PathBuf>,

    /// Constants of the profile matcher
    pub matcher: MatchConfig,
}

impl MeasurementConfig {
    /// Builder: Set the phantom model
    pub fn with_phantom_size(mut self, phantom_size: PhantomSize) -> Self {
        self.phantom_size = phantom_size;
        self
    }

    /// Builder: Enable diagnostics written to `dir`
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report = true;
        self.report_dir = Some(dir.into());
        self
    }

    /// Builder: Replace the matcher constants
    pub fn with_matcher(mut self, matcher: MatchConfig) -> Self {
        self.matcher = matcher;
        self
    }
}

/// Constants of the circular shift search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    /// Upsampling factor applied to both profiles
    pub interp_factor: usize,

    /// Lags searched on each side of zero, in upsampled samples
    pub max_lag: usize,

    /// Half-width of the region of interest around the strongest transient
    pub roi_half_width: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            interp_factor: 5,
            max_lag: 50,
            roi_half_width: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MeasurementConfig::default();
        assert_eq!(config.phantom_size, PhantomSize::Standard);
        assert!(!config.report);
        assert!(config.report_dir.is_none());
        assert_eq!(config.matcher.interp_factor, 5);
        assert_eq!(config.matcher.max_lag, 50);
        assert_eq!(config.matcher.roi_half_width, 10);
    }
}
