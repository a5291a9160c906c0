use crate::error::{Result, SliceposError};
use crate::signal::{abs_diff, find_n_highest_peaks, masked_profile_line, mean_profile};
use crate::types::{Image, Mask, PhantomSize, PixelSpacing, WedgeWindow};
use log::{debug, warn};

use super::validate::validate_inputs;

/// Width of the band of rows averaged when looking for the wedge edges (mm)
const WEDGE_BAND_WIDTH_MM: f64 = 35.0;

/// Width of the band of columns averaged when looking for the wedge ends (mm)
const WEDGE_BAND_HEIGHT_MM: f64 = 20.0;

/// Wedge ends closer than this are treated as noise (mm)
const MIN_WEDGE_LENGTH_MM: f64 = 5.0;

/// Profile start used when the wedge ends cannot be resolved (mm below the top)
const FALLBACK_START_MM: f64 = 10.0;

/// Derivative peaks lower than this are ignored
const EDGE_MIN_HEIGHT: f64 = 1.0;

/// Bounding extent of the phantom mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskExtent {
    /// Westmost foreground column
    pub west: usize,
    /// Eastmost foreground column
    pub east: usize,
    /// Northmost foreground row
    pub north: usize,
}

impl MaskExtent {
    /// Computes the extent, `None` for a mask without foreground
    pub fn of(mask: &Mask) -> Option<Self> {
        let mut west = usize::MAX;
        let mut east = 0;
        let mut north = usize::MAX;

        for r in 0..mask.rows() {
            let Some(row) = mask.row(r) else { continue };
            for (c, &set) in row.iter().enumerate() {
                if set {
                    west = west.min(c);
                    east = east.max(c);
                    north = north.min(r);
                }
            }
        }

        (north != usize::MAX).then_some(Self { west, east, north })
    }
}

/// Locates the slice position wedges in an ACR phantom slice
///
/// # Algorithm
///
/// 1. Average masked horizontal profiles over a 35 mm band below the top of
///    the phantom; the two strongest derivative peaks are the outer edges of
///    the wedge pair, and the wedge centres sit at 25% and 75% between them.
/// 2. Average masked vertical profiles over a 20 mm band of columns centred
///    between the wedges; the two strongest derivative peaks bound the wedges
///    vertically and the profile starts a quarter of the way down.
/// 3. The profile ends a fixed distance below the top of the phantom
///    (47 mm, or 35 mm on the medium phantom).
#[derive(Debug, Clone, Copy, Default)]
pub struct WedgeLocator {
    phantom_size: PhantomSize,
}

impl WedgeLocator {
    pub fn new(phantom_size: PhantomSize) -> Self {
        Self { phantom_size }
    }

    pub fn phantom_size(&self) -> PhantomSize {
        self.phantom_size
    }

    /// Finds the profile columns and rows for one slice
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the inputs fail validation and
    /// `WedgeNotFound` when the derivative peaks do not describe a usable
    /// wedge pair.
    pub fn locate(&self, image: &Image, mask: &Mask, spacing: &PixelSpacing) -> Result<WedgeWindow> {
        validate_inputs(image, mask, spacing)?;
        let extent = MaskExtent::of(mask).ok_or_else(|| {
            SliceposError::InvalidInput("mask has no foreground pixels".to_string())
        })?;
        debug!(
            "Phantom extent: west={}, east={}, north={}",
            extent.west, extent.east, extent.north
        );

        let (x_left, x_right) = find_wedge_columns(image, mask, &extent, spacing.x())?;
        let (y_start, y_end) =
            self.find_profile_rows(image, mask, &extent, spacing.y(), (x_left, x_right))?;

        let window = WedgeWindow::new(x_left, x_right, y_start, y_end);
        debug!("Wedge window: {}", window);
        Ok(window)
    }

    fn find_profile_rows(
        &self,
        image: &Image,
        mask: &Mask,
        extent: &MaskExtent,
        res_y: f64,
        columns: (usize, usize),
    ) -> Result<(usize, usize)> {
        let height = odd_window(WEDGE_BAND_HEIGHT_MM, res_y);
        let north = extent.north as f64;
        let end = north + (self.phantom_size.wedge_search_depth_mm() / res_y).round_ties_even();
        let centre = ((columns.0 + columns.1) / 2) as isize;
        let half = (height / 2) as isize;

        let profiles: Vec<Vec<f64>> = (0..height as isize)
            .map(|m| {
                let col = (centre + m - half) as f64;
                masked_profile_line(image, mask, (north, col), (end, col))
            })
            .collect();

        let diff = abs_diff(&mean_profile(&profiles));
        let peak_rows: Vec<f64> = find_n_highest_peaks(&diff, 2, Some(EDGE_MIN_HEIGHT))
            .into_iter()
            .map(|p| north + p as f64 - 1.0)
            .collect();
        debug!("Wedge end rows: {:?}", peak_rows);

        let y_start = resolve_profile_start(&peak_rows, extent.north, res_y);
        let dist_to_start = (y_start - north).abs() * res_y;
        let y_end =
            (y_start + (self.phantom_size.profile_end_mm() - dist_to_start) / res_y).round_ties_even();

        if y_start < 0.0 || y_end <= y_start {
            return Err(SliceposError::WedgeNotFound(format!(
                "profile rows {} to {} are not a valid segment",
                y_start, y_end
            )));
        }

        Ok((y_start as usize, y_end as usize))
    }
}

/// Finds the left and right wedge centre columns
fn find_wedge_columns(
    image: &Image,
    mask: &Mask,
    extent: &MaskExtent,
    res_x: f64,
) -> Result<(usize, usize)> {
    let width = odd_window(WEDGE_BAND_WIDTH_MM, res_x);
    let west = extent.west as f64;
    let east = extent.east as f64;

    let profiles: Vec<Vec<f64>> = (0..width)
        .map(|k| {
            let row = (extent.north + k) as f64;
            masked_profile_line(image, mask, (row, west), (row, east))
        })
        .collect();

    let diff = abs_diff(&mean_profile(&profiles));
    let peaks = find_n_highest_peaks(&diff, 2, Some(EDGE_MIN_HEIGHT));
    if peaks.len() < 2 {
        return Err(SliceposError::WedgeNotFound(format!(
            "expected 2 wedge edges across the phantom, found {}",
            peaks.len()
        )));
    }

    let edges: Vec<f64> = peaks.iter().map(|&p| (extent.west + p) as f64).collect();
    let lo = edges[0].min(edges[1]);
    let hi = edges[0].max(edges[1]);
    let span = hi - lo;
    debug!("Wedge edges at columns {} and {}", lo, hi);

    let left = (lo + 0.25 * span).round_ties_even() as usize;
    let right = (hi - 0.25 * span).round_ties_even() as usize;
    if left >= right {
        return Err(SliceposError::WedgeNotFound(format!(
            "wedge edges {} and {} are too close to separate the wedges",
            lo, hi
        )));
    }

    Ok((left, right))
}

/// Picks the first profile row from the wedge end rows
///
/// Falls back to a fixed offset below the top of the phantom when fewer
/// than two ends were found or they are closer than 5 mm.
pub(crate) fn resolve_profile_start(peak_rows: &[f64], north: usize, res_y: f64) -> f64 {
    let fallback = north as f64 + (FALLBACK_START_MM / res_y).round_ties_even();

    let [a, b] = match peak_rows {
        [a, b, ..] => [*a, *b],
        _ => {
            warn!(
                "Found {} wedge ends, using phantom geometry for the profile start",
                peak_rows.len()
            );
            return fallback;
        }
    };

    let separation = (b - a).abs();
    if separation < MIN_WEDGE_LENGTH_MM / res_y {
        warn!(
            "Wedge ends only {} rows apart, using phantom geometry for the profile start",
            separation
        );
        return fallback;
    }

    (a.min(b) + 0.25 * separation).round_ties_even()
}

/// Number of pixels covering `mm`, rounded up to the next odd number
pub(crate) fn odd_window(mm: f64, res: f64) -> usize {
    let n = (mm / res).ceil().max(1.0) as usize;
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}
