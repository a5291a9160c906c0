use thiserror::Error;

/// Result type for slicepos operations
pub type Result<T> = std::result::Result<T, SliceposError>;

/// Error types for slicepos operations
#[derive(Error, Debug)]
pub enum SliceposError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Tag not found in DICOM file
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// Image, mask or spacing rejected before measurement
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The wedge pair could not be located in the phantom
    #[error("Wedges not found: {0}")]
    WedgeNotFound(String),

    /// The wedge profiles differ without any interior transient to match on
    #[error("No transient found in the profile difference")]
    NoTransient,

    /// Every candidate lag was left without valid samples
    #[error("Degenerate shift search: {0}")]
    Degenerate(String),

    /// Measurement of a single image failed
    #[error("Could not calculate the bar length difference for {image} because of: {source}")]
    Measurement {
        image: String,
        #[source]
        source: Box<SliceposError>,
    },

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SliceposError {
    /// Wraps an error with the description of the image being measured
    pub fn for_image(image: impl Into<String>, source: SliceposError) -> Self {
        SliceposError::Measurement {
            image: image.into(),
            source: Box::new(source),
        }
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for SliceposError {
    fn from(e: dicom_object::ReadError) -> Self {
        SliceposError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for SliceposError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        SliceposError::InvalidValue(format!("{}", e))
    }
}

impl From<dicom_pixeldata::Error> for SliceposError {
    fn from(e: dicom_pixeldata::Error) -> Self {
        SliceposError::DicomError(format!("pixel data: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_error_names_image() {
        let err = SliceposError::for_image(
            "ACR_T1_1_11",
            SliceposError::InvalidInput("mask has no foreground pixels".to_string()),
        );
        let msg = err.to_string();
        assert!(msg.contains("ACR_T1_1_11"));
        assert!(msg.contains("mask has no foreground pixels"));
    }
}
