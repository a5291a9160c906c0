use rstest::rstest;
use slicepos_core::{
    measure_slice, Grid, Image, Mask, MeasurementConfig, PhantomSize, PixelSpacing,
    SlicePositionTask, SliceposError, TaskOutcome, WedgeWindow,
};

/// Bright 200 x 200 phantom with two adjacent dark wedges starting at row 25
fn wedge_phantom(left_len: usize, right_len: usize) -> (Image, Mask) {
    let inside = |r: usize, c: usize| (20..220).contains(&r) && (40..240).contains(&c);
    let mask = Grid::from_fn(256, 256, inside);
    let image = Grid::from_fn(256, 256, |r, c| {
        if !inside(r, c) {
            0.0
        } else if (100..125).contains(&c) && (25..25 + left_len).contains(&r) {
            10.0
        } else if (125..150).contains(&c) && (25..25 + right_len).contains(&r) {
            10.0
        } else {
            100.0
        }
    });
    (image, mask)
}

#[rstest]
#[case(25, 28, 3.0)]
#[case(28, 25, -3.0)]
fn test_bar_length_difference(#[case] left: usize, #[case] right: usize, #[case] expected: f64) {
    let (image, mask) = wedge_phantom(left, right);
    let measurement = measure_slice(
        &image,
        &mask,
        &PixelSpacing::isotropic(1.0),
        &MeasurementConfig::default(),
    )
    .unwrap();

    assert_eq!(measurement.window.x_left, 112);
    assert_eq!(measurement.window.x_right, 136);
    assert!(
        (measurement.length_difference() - expected).abs() < 0.2,
        "got {}",
        measurement.length_difference()
    );
}

#[test]
fn test_standard_phantom_window() {
    let (image, mask) = wedge_phantom(25, 28);
    let measurement = measure_slice(
        &image,
        &mask,
        &PixelSpacing::isotropic(1.0),
        &MeasurementConfig::default(),
    )
    .unwrap();
    assert_eq!(measurement.window, WedgeWindow::new(112, 136, 29, 67));
    assert_eq!(measurement.left_profile.len(), 39);
    assert_eq!(measurement.right_profile.len(), 39);
}

#[test]
fn test_medium_phantom_uses_shorter_profiles() {
    let (image, mask) = wedge_phantom(25, 28);
    let config = MeasurementConfig::default().with_phantom_size(PhantomSize::Medium);
    let measurement =
        measure_slice(&image, &mask, &PixelSpacing::isotropic(1.0), &config).unwrap();

    assert_eq!(measurement.window, WedgeWindow::new(112, 136, 29, 55));
    assert!(measurement.length_difference() > 0.0);
}

#[test]
fn test_equal_wedges_measure_zero() {
    let (image, mask) = wedge_phantom(26, 26);
    let measurement = measure_slice(
        &image,
        &mask,
        &PixelSpacing::isotropic(1.0),
        &MeasurementConfig::default(),
    )
    .unwrap();
    assert_eq!(measurement.length_difference(), 0.0);
}

#[test]
fn test_empty_mask_is_rejected() {
    let (image, _) = wedge_phantom(25, 28);
    let mask = Grid::from_fn(256, 256, |_, _| false);
    let err = measure_slice(
        &image,
        &mask,
        &PixelSpacing::isotropic(1.0),
        &MeasurementConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SliceposError::InvalidInput(_)));
}

#[test]
fn test_task_result_over_both_end_slices() {
    let task = SlicePositionTask::new(MeasurementConfig::default());
    let (first, mask) = wedge_phantom(25, 28);
    let (last, _) = wedge_phantom(28, 25);
    let spacing = PixelSpacing::isotropic(1.0);

    let outcome = TaskOutcome {
        images: vec![
            task.measure_image("ACR_T1_1_1", &first, &mask, spacing),
            task.measure_image("ACR_T1_1_11", &last, &mask, spacing),
        ],
        report: false,
    };
    assert_eq!(outcome.failure_count(), 0);

    let result = outcome.into_result().unwrap();
    assert_eq!(result.file, vec!["ACR_T1_1_1", "ACR_T1_1_11"]);
    assert_eq!(result.measurement["ACR_T1_1_1"].length_difference, 3.0);
    assert_eq!(result.measurement["ACR_T1_1_11"].length_difference, -3.0);
}
