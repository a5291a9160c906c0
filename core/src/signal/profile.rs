use crate::types::{Image, Mask, Segment};

/// Samples `image` along the straight line from `start` to `end`
///
/// Points are (row, col). Both endpoints are included and the line is cut
/// into `ceil(length) + 1` evenly spaced samples, each read with bilinear
/// interpolation. Anything outside the image reads as zero.
pub fn profile_line(image: &Image, start: (f64, f64), end: (f64, f64)) -> Vec<f64> {
    let (r0, c0) = start;
    let (r1, c1) = end;
    let length = (r1 - r0).hypot(c1 - c0);
    let n = length.ceil() as usize + 1;

    if n == 1 {
        return vec![sample_bilinear(image, r0, c0)];
    }

    let last = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / last;
            sample_bilinear(image, r0 + (r1 - r0) * t, c0 + (c1 - c0) * t)
        })
        .collect()
}

/// Like [`profile_line`], with off-mask samples set to zero
pub fn masked_profile_line(
    image: &Image,
    mask: &Mask,
    start: (f64, f64),
    end: (f64, f64),
) -> Vec<f64> {
    let values = profile_line(image, start, end);
    let last = values.len().saturating_sub(1).max(1) as f64;
    let (r0, c0) = start;
    let (r1, c1) = end;

    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let t = i as f64 / last;
            let r = (r0 + (r1 - r0) * t).round() as isize;
            let c = (c0 + (c1 - c0) * t).round() as isize;
            if mask.is_set(r, c) {
                v
            } else {
                0.0
            }
        })
        .collect()
}

/// Samples one segment of a wedge window
pub fn segment_profile(image: &Image, segment: Segment) -> Vec<f64> {
    profile_line(image, segment.0, segment.1)
}

/// Element-wise mean of equally long profiles
///
/// Returns an empty profile when `profiles` is empty.
pub fn mean_profile(profiles: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = profiles.first() else {
        return Vec::new();
    };

    let mut sum = vec![0.0; first.len()];
    for profile in profiles {
        for (acc, v) in sum.iter_mut().zip(profile.iter()) {
            *acc += v;
        }
    }

    let count = profiles.len() as f64;
    sum.into_iter().map(|v| v / count).collect()
}

/// Absolute first difference, one sample shorter than the input
pub fn abs_diff(profile: &[f64]) -> Vec<f64> {
    profile.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

fn sample_bilinear(image: &Image, row: f64, col: f64) -> f64 {
    let r0 = row.floor();
    let c0 = col.floor();
    let dr = row - r0;
    let dc = col - c0;
    let (r0, c0) = (r0 as isize, c0 as isize);

    let at = |r: isize, c: isize| image.get_signed(r, c).copied().unwrap_or(0.0);

    // Skip neighbours with zero weight so exact grid points never read outside
    let p00 = at(r0, c0);
    let p01 = if dc > 0.0 { at(r0, c0 + 1) } else { 0.0 };
    let p10 = if dr > 0.0 { at(r0 + 1, c0) } else { 0.0 };
    let p11 = if dr > 0.0 && dc > 0.0 {
        at(r0 + 1, c0 + 1)
    } else {
        0.0
    };

    let top = p00 * (1.0 - dc) + p01 * dc;
    let bottom = p10 * (1.0 - dc) + p11 * dc;
    top * (1.0 - dr) + bottom * dr
}
