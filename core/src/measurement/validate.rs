use crate::error::{Result, SliceposError};
use crate::types::{Image, Mask, PixelSpacing};

/// Rejects inputs the wedge locator cannot work with
///
/// # Errors
///
/// Returns `InvalidInput` if:
/// - the image is empty
/// - image and mask shapes differ
/// - the mask has no foreground pixels
/// - either pixel spacing is not a positive finite number
pub fn validate_inputs(image: &Image, mask: &Mask, spacing: &PixelSpacing) -> Result<()> {
    if image.rows() == 0 || image.cols() == 0 {
        return Err(SliceposError::InvalidInput("image is empty".to_string()));
    }

    if image.shape() != mask.shape() {
        return Err(SliceposError::InvalidInput(format!(
            "mask shape {:?} does not match image shape {:?}",
            mask.shape(),
            image.shape()
        )));
    }

    if mask.count() == 0 {
        return Err(SliceposError::InvalidInput(
            "mask has no foreground pixels".to_string(),
        ));
    }

    if !spacing.is_valid() {
        return Err(SliceposError::InvalidInput(format!(
            "pixel spacing must be positive, got {}",
            spacing
        )));
    }

    Ok(())
}

/// Rejects profile pairs the shift matcher cannot compare
pub fn validate_profiles(left: &[f64], right: &[f64]) -> Result<()> {
    if left.len() != right.len() {
        return Err(SliceposError::InvalidInput(format!(
            "profiles differ in length: {} vs {}",
            left.len(),
            right.len()
        )));
    }

    if left.len() < 2 {
        return Err(SliceposError::InvalidInput(format!(
            "profiles need at least 2 samples, got {}",
            left.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grid;

    fn image() -> Image {
        Grid::from_fn(8, 8, |_, _| 1.0)
    }

    #[test]
    fn test_accepts_valid_inputs() {
        let mask = Grid::from_fn(8, 8, |r, _| r > 2);
        assert!(validate_inputs(&image(), &mask, &PixelSpacing::isotropic(1.0)).is_ok());
    }

    #[test]
    fn test_rejects_empty_mask() {
        let mask = Grid::from_fn(8, 8, |_, _| false);
        let err = validate_inputs(&image(), &mask, &PixelSpacing::isotropic(1.0)).unwrap_err();
        assert!(matches!(err, SliceposError::InvalidInput(_)));
        assert!(err.to_string().contains("no foreground"));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let mask = Grid::from_fn(8, 7, |_, _| true);
        let err = validate_inputs(&image(), &mask, &PixelSpacing::isotropic(1.0)).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_rejects_bad_spacing() {
        let mask = Grid::from_fn(8, 8, |_, _| true);
        assert!(validate_inputs(&image(), &mask, &PixelSpacing::new(0.0, 1.0)).is_err());
        assert!(validate_inputs(&image(), &mask, &PixelSpacing::new(1.0, -0.5)).is_err());
    }

    #[test]
    fn test_profile_checks() {
        assert!(validate_profiles(&[1.0, 2.0], &[1.0, 2.0]).is_ok());
        assert!(validate_profiles(&[1.0, 2.0], &[1.0]).is_err());
        assert!(validate_profiles(&[1.0], &[1.0]).is_err());
    }
}
