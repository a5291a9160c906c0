//! Local-maximum peak picking on 1-D signals

/// Finds the indices of all local maxima in `signal`
///
/// A sample is a peak when its left neighbour is strictly lower and the
/// first differing sample to its right is strictly lower too. Flat tops are
/// reported once, at their middle (rounded down). The first and last samples
/// are never peaks.
pub fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if signal.len() < 3 {
        return peaks;
    }

    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}

/// Returns up to `n` peak indices of `signal`, highest first
///
/// Peaks lower than `min_height` are discarded. Peaks of equal height keep
/// their left-to-right order.
pub fn find_n_highest_peaks(signal: &[f64], n: usize, min_height: Option<f64>) -> Vec<usize> {
    let mut peaks: Vec<usize> = local_maxima(signal)
        .into_iter()
        .filter(|&i| min_height.map_or(true, |h| signal[i] >= h))
        .collect();

    peaks.sort_by(|&a, &b| signal[b].total_cmp(&signal[a]));
    peaks.truncate(n);
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[0.0, 1.0, 0.0], vec![1])]
    #[case(&[0.0, 2.0, 2.0, 2.0, 0.0], vec![2])]
    #[case(&[0.0, 2.0, 2.0, 0.0], vec![1])]
    #[case(&[3.0, 1.0, 2.0], vec![])]
    #[case(&[0.0, 1.0, 1.0], vec![])]
    #[case(&[0.0, 1.0, 2.0, 3.0], vec![])]
    #[case(&[0.0, 5.0, 0.0, 3.0, 3.0, 1.0, 4.0, 0.0], vec![1, 3, 6])]
    fn test_local_maxima(#[case] signal: &[f64], #[case] expected: Vec<usize>) {
        assert_eq!(local_maxima(signal), expected);
    }

    #[test]
    fn test_short_signals_have_no_peaks() {
        assert!(local_maxima(&[]).is_empty());
        assert!(local_maxima(&[1.0]).is_empty());
        assert!(local_maxima(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_highest_first() {
        let signal = [0.0, 5.0, 0.0, 3.0, 0.0, 9.0, 0.0, 1.0, 0.0];
        assert_eq!(find_n_highest_peaks(&signal, 2, None), vec![5, 1]);
        assert_eq!(find_n_highest_peaks(&signal, 10, None), vec![5, 1, 3, 7]);
    }

    #[test]
    fn test_min_height_filters() {
        let signal = [0.0, 5.0, 0.0, 3.0, 0.0, 9.0, 0.0, 1.0, 0.0];
        assert_eq!(find_n_highest_peaks(&signal, 10, Some(4.5)), vec![5, 1]);
        assert_eq!(find_n_highest_peaks(&signal, 10, Some(3.0)), vec![5, 1, 3]);
        assert!(find_n_highest_peaks(&signal, 10, Some(10.0)).is_empty());
    }

    #[test]
    fn test_ties_keep_index_order() {
        let signal = [0.0, 2.0, 0.0, 2.0, 0.0];
        assert_eq!(find_n_highest_peaks(&signal, 2, None), vec![1, 3]);
    }
}
