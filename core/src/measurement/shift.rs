use crate::error::{Result, SliceposError};
use crate::signal::{find_n_highest_peaks, upsample_linear};
use crate::types::MatchConfig;
use log::debug;
use std::ops::Range;

use super::validate::validate_profiles;

/// Mean absolute residual of one candidate lag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagError {
    pub lag: isize,
    /// `None` when every sample of the residual wrapped around
    pub error: Option<f64>,
}

/// Outcome of matching the left and right wedge profiles
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftMatch {
    /// Bar length difference in mm
    pub length_difference: f64,

    /// Lag with the smallest residual, in upsampled samples
    pub lag: isize,

    /// Shift to apply to the right profile to line it up with the left one
    pub shift: isize,

    /// +1 when the left profile dominates the strongest transient, -1 otherwise
    pub sign: i8,

    /// Region of interest around the strongest transient
    pub roi: Range<usize>,

    /// Upsampled left profile
    pub left: Vec<f64>,

    /// Upsampled right profile
    pub right: Vec<f64>,
}

/// Matches wedge profiles with a windowed circular shift search
///
/// # Algorithm
///
/// 1. Upsample both profiles linearly
/// 2. Centre a region of interest on the strongest peak of |left - right|
/// 3. Decide the direction from whichever polarity of the difference is
///    larger inside the region
/// 4. Circularly shift the left region by every lag in `[-max_lag, max_lag]`,
///    ignoring wrapped samples, and keep the non-zero lag with the smallest
///    mean absolute residual against the right region
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftMatcher {
    config: MatchConfig,
}

impl ShiftMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Matches two equally long profiles sampled with row spacing `res_y`
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the profiles differ in length or are shorter than 2
    /// - `NoTransient` if the profiles differ but |left - right| has no peak
    /// - `Degenerate` if no non-zero lag leaves any valid sample
    pub fn match_profiles(&self, left: &[f64], right: &[f64], res_y: f64) -> Result<ShiftMatch> {
        validate_profiles(left, right)?;

        let factor = self.config.interp_factor.max(1);
        let left = upsample_linear(left, factor);
        let right = upsample_linear(right, factor);

        let delta: Vec<f64> = left.iter().zip(right.iter()).map(|(l, r)| l - r).collect();
        let abs_delta: Vec<f64> = delta.iter().map(|d| d.abs()).collect();
        let max_abs = abs_delta.iter().copied().fold(0.0, f64::max);

        if max_abs == 0.0 {
            debug!("Profiles are identical, no shift");
            return Ok(ShiftMatch {
                length_difference: 0.0,
                lag: 0,
                shift: 0,
                sign: 1,
                roi: 0..0,
                left,
                right,
            });
        }

        let peak = find_n_highest_peaks(&abs_delta, 1, Some(0.5 * max_abs))
            .first()
            .copied()
            .ok_or(SliceposError::NoTransient)?;

        let half = self.config.roi_half_width;
        let roi = peak.saturating_sub(half)..(peak + half).min(delta.len());
        debug!("Strongest transient at {}, region {:?}", peak, roi);

        let sign = transient_sign(&delta[roi.clone()]);
        let errors = lag_errors(
            &left[roi.clone()],
            &right[roi.clone()],
            self.config.max_lag as isize,
        );
        let best = select_lag(&errors).ok_or_else(|| {
            SliceposError::Degenerate(format!(
                "no lag within ±{} leaves valid samples in a region of {}",
                self.config.max_lag,
                roi.len()
            ))
        })?;

        let shift = if sign == 1 { -best.lag } else { best.lag };
        let length_difference =
            f64::from(sign) * shift.unsigned_abs() as f64 / factor as f64 * res_y;
        debug!(
            "Best lag {} (error {:?}), sign {}, length difference {:.3} mm",
            best.lag, best.error, sign, length_difference
        );

        Ok(ShiftMatch {
            length_difference,
            lag: best.lag,
            shift,
            sign,
            roi,
            left,
            right,
        })
    }

    /// Bar length difference in mm between the two wedge profiles
    pub fn bar_length_difference(&self, left: &[f64], right: &[f64], res_y: f64) -> Result<f64> {
        Ok(self.match_profiles(left, right, res_y)?.length_difference)
    }
}

/// Convenience wrapper using the default matcher constants
pub fn bar_length_difference(left: &[f64], right: &[f64], res_y: f64) -> Result<f64> {
    ShiftMatcher::default().bar_length_difference(left, right, res_y)
}

/// +1 if the positive part of `delta` dominates, -1 otherwise
fn transient_sign(delta: &[f64]) -> i8 {
    let max_pos = delta.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_neg = delta.iter().map(|d| -d).fold(f64::NEG_INFINITY, f64::max);
    if max_neg < max_pos {
        1
    } else {
        -1
    }
}

/// Mean absolute residual of `right - roll(left, lag)` for every lag
///
/// Samples that wrapped around during the roll are left out: the first
/// `lag` samples for positive lags, the last `|lag|` for negative ones.
pub fn lag_errors(left: &[f64], right: &[f64], max_lag: isize) -> Vec<LagError> {
    let n = left.len().min(right.len());
    let len = n as isize;

    (-max_lag..=max_lag)
        .map(|lag| {
            let valid = if lag > 0 {
                lag.min(len)..len
            } else {
                0..(len + lag).max(0)
            };

            let mut sum = 0.0;
            let mut count = 0usize;
            for i in valid {
                let j = (i - lag).rem_euclid(len) as usize;
                sum += (right[i as usize] - left[j]).abs();
                count += 1;
            }

            LagError {
                lag,
                error: (count > 0).then(|| sum / count as f64),
            }
        })
        .collect()
}

/// Picks the lag with the smallest error
///
/// Lag 0 is never selected, whatever its error. Lags without valid samples
/// are skipped. Equal errors resolve to the most negative lag.
pub fn select_lag(errors: &[LagError]) -> Option<LagError> {
    errors
        .iter()
        .filter(|e| e.lag != 0)
        .filter_map(|e| e.error.map(|err| (e, err)))
        .fold(None, |best: Option<(&LagError, f64)>, (e, err)| match best {
            Some((_, best_err)) if best_err <= err => best,
            _ => Some((e, err)),
        })
        .map(|(e, _)| *e)
}
