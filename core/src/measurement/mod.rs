//! Bar length difference measurement for a single slice
//!
//! - [`WedgeLocator`]: finds the profile segments through the two wedges
//! - [`ShiftMatcher`]: aligns the two wedge profiles and converts the shift to mm
//! - [`measure_slice`]: runs both on one image

pub mod shift;
pub mod validate;
pub mod wedges;

pub use shift::{bar_length_difference, lag_errors, select_lag, LagError, ShiftMatch, ShiftMatcher};
pub use validate::{validate_inputs, validate_profiles};
pub use wedges::{MaskExtent, WedgeLocator};

use crate::error::Result;
use crate::signal::segment_profile;
use crate::types::{Image, Mask, MeasurementConfig, PixelSpacing, WedgeWindow};

/// Everything computed while measuring one slice
#[derive(Debug, Clone, PartialEq)]
pub struct SliceMeasurement {
    /// Where the wedge profiles were taken
    pub window: WedgeWindow,

    /// Raw profile through the left wedge
    pub left_profile: Vec<f64>,

    /// Raw profile through the right wedge
    pub right_profile: Vec<f64>,

    /// Result of the shift search
    pub matched: ShiftMatch,
}

impl SliceMeasurement {
    /// Bar length difference in mm
    pub fn length_difference(&self) -> f64 {
        self.matched.length_difference
    }
}

/// Measures the bar length difference of one slice
///
/// # Errors
///
/// Propagates validation, wedge localization and shift matching errors.
pub fn measure_slice(
    image: &Image,
    mask: &Mask,
    spacing: &PixelSpacing,
    config: &MeasurementConfig,
) -> Result<SliceMeasurement> {
    let window = WedgeLocator::new(config.phantom_size).locate(image, mask, spacing)?;

    let left_profile = segment_profile(image, window.left_segment());
    let right_profile = segment_profile(image, window.right_segment());

    let matched = ShiftMatcher::new(config.matcher).match_profiles(
        &left_profile,
        &right_profile,
        spacing.y(),
    )?;

    Ok(SliceMeasurement {
        window,
        left_profile,
        right_profile,
        matched,
    })
}
