use crate::error::{Result, SliceposError};
use log::info;
use std::cmp::Ordering;
use std::path::PathBuf;

use super::slice::DicomSlice;

/// Reads every file and returns the slices in acquisition order
///
/// # Errors
///
/// Fails on the first unreadable file, or when `paths` is empty.
pub fn load_series(paths: &[PathBuf]) -> Result<Vec<DicomSlice>> {
    if paths.is_empty() {
        return Err(SliceposError::InvalidInput(
            "no DICOM files given".to_string(),
        ));
    }

    let mut slices = paths
        .iter()
        .map(|path| DicomSlice::from_file(path.clone()))
        .collect::<Result<Vec<_>>>()?;
    sort_slices(&mut slices);
    info!("Loaded series of {} slices", slices.len());
    Ok(slices)
}

/// Orders slices by Instance Number, slices without one go last
///
/// File path breaks ties.
pub fn sort_slices(slices: &mut [DicomSlice]) {
    slices.sort_by(|a, b| {
        let by_instance = match (a.instance_number, b.instance_number) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_instance.then_with(|| a.file_path.cmp(&b.file_path))
    });
}

/// First and last slice of an ordered series
///
/// A single-slice series yields that slice once.
pub fn end_slices(slices: &[DicomSlice]) -> Vec<&DicomSlice> {
    match slices {
        [] => Vec::new(),
        [only] => vec![only],
        [first, .., last] => vec![first, last],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Grid, PixelSpacing};

    fn slice(path: &str, instance: Option<i32>) -> DicomSlice {
        DicomSlice {
            file_path: PathBuf::from(path),
            description: format!("ACR_1_{}", instance.unwrap_or(0)),
            instance_number: instance,
            spacing: PixelSpacing::isotropic(1.0),
            image: Grid::from_fn(2, 2, |_, _| 0.0),
        }
    }

    #[test]
    fn test_sort_by_instance_number() {
        let mut slices = vec![
            slice("c.dcm", Some(11)),
            slice("a.dcm", None),
            slice("b.dcm", Some(2)),
            slice("d.dcm", Some(1)),
        ];
        sort_slices(&mut slices);
        let order: Vec<_> = slices.iter().map(|s| s.instance_number).collect();
        assert_eq!(order, vec![Some(1), Some(2), Some(11), None]);
    }

    #[test]
    fn test_sort_ties_by_path() {
        let mut slices = vec![slice("b.dcm", Some(1)), slice("a.dcm", Some(1))];
        sort_slices(&mut slices);
        assert_eq!(slices[0].file_path, PathBuf::from("a.dcm"));
    }

    #[test]
    fn test_end_slices() {
        let slices = vec![
            slice("1.dcm", Some(1)),
            slice("2.dcm", Some(2)),
            slice("3.dcm", Some(3)),
        ];
        let ends: Vec<_> = end_slices(&slices)
            .iter()
            .map(|s| s.instance_number)
            .collect();
        assert_eq!(ends, vec![Some(1), Some(3)]);

        assert_eq!(end_slices(&slices[..1]).len(), 1);
        assert!(end_slices(&[]).is_empty());
    }

    #[test]
    fn test_load_series_requires_files() {
        assert!(matches!(
            load_series(&[]),
            Err(SliceposError::InvalidInput(_))
        ));
    }
}
