/// Linearly upsamples `profile` by an integer `factor`
///
/// Samples are placed every `1 / factor` along the index axis between the
/// first and last input sample, so the output has `(len - 1) * factor + 1`
/// samples and every `factor`-th output equals an input sample exactly.
pub fn upsample_linear(profile: &[f64], factor: usize) -> Vec<f64> {
    if profile.len() < 2 || factor <= 1 {
        return profile.to_vec();
    }

    let step = 1.0 / factor as f64;
    let mut out = Vec::with_capacity((profile.len() - 1) * factor + 1);
    for pair in profile.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let slope = hi - lo;
        for k in 0..factor {
            out.push(lo + slope * (k as f64 * step));
        }
    }
    out.push(profile[profile.len() - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_knots() {
        let profile = [10.0, 100.0, 40.0];
        let up = upsample_linear(&profile, 5);
        assert_eq!(up.len(), 11);
        assert_eq!(up[0], 10.0);
        assert_eq!(up[5], 100.0);
        assert_eq!(up[10], 40.0);
    }

    #[test]
    fn test_midpoints_are_linear() {
        let up = upsample_linear(&[0.0, 10.0], 5);
        let expected = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
        for (a, b) in up.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_inputs_pass_through() {
        assert_eq!(upsample_linear(&[3.0], 5), vec![3.0]);
        assert_eq!(upsample_linear(&[1.0, 2.0], 1), vec![1.0, 2.0]);
    }
}
