use crate::error::{Result, SliceposError};
use crate::types::{Grid, Image, Mask, PixelSpacing};
use dicom_object::{open_file, DefaultDicomObject, InMemDicomObject};
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use log::debug;
use std::path::{Path, PathBuf};

use super::tags::{
    get_int_value, get_string_value, get_u16_value, COLUMNS, IMAGER_PIXEL_SPACING,
    INSTANCE_NUMBER, PIXEL_SPACING, ROWS, SERIES_DESCRIPTION, SERIES_NUMBER,
};

/// One decoded slice of the phantom series
#[derive(Debug, Clone)]
pub struct DicomSlice {
    /// Path to the DICOM file
    pub file_path: PathBuf,

    /// `SeriesDescription_SeriesNumber_InstanceNumber`
    pub description: String,

    /// Instance Number, used to order the series
    pub instance_number: Option<i32>,

    /// In-plane resolution
    pub spacing: PixelSpacing,

    /// Stored pixel values of the first frame
    pub image: Image,
}

impl DicomSlice {
    /// Reads and decodes a slice from a DICOM file
    pub fn from_file(path: PathBuf) -> Result<Self> {
        let dcm = open_file(&path)?;
        Self::from_dicom(path, &dcm)
    }

    /// Decodes a slice from an already-opened DICOM object
    pub fn from_dicom(path: PathBuf, dcm: &DefaultDicomObject) -> Result<Self> {
        let description = image_description(dcm);
        let spacing = extract_pixel_spacing(dcm)?;
        let image = decode_image(dcm)?;
        debug!(
            "Loaded {} ({} x {}, {})",
            description,
            image.rows(),
            image.cols(),
            spacing
        );

        Ok(Self {
            file_path: path,
            description,
            instance_number: get_int_value(dcm, INSTANCE_NUMBER),
            spacing,
            image,
        })
    }
}

/// Builds the identifying description of an image
///
/// Joins SeriesDescription, SeriesNumber and InstanceNumber with
/// underscores; spaces inside the values become underscores too. Missing
/// values are written as `None`.
pub fn image_description(dcm: &InMemDicomObject) -> String {
    [SERIES_DESCRIPTION, SERIES_NUMBER, INSTANCE_NUMBER]
        .iter()
        .map(|&tag| get_string_value(dcm, tag).unwrap_or_else(|| "None".to_string()))
        .collect::<Vec<_>>()
        .join("_")
        .replace(' ', "_")
}

/// Reads PixelSpacing, falling back to ImagerPixelSpacing
///
/// # Errors
///
/// Returns `TagNotFound` if neither tag is present and `InvalidValue` if the
/// value does not hold two positive numbers.
pub fn extract_pixel_spacing(dcm: &InMemDicomObject) -> Result<PixelSpacing> {
    let raw = get_string_value(dcm, PIXEL_SPACING)
        .or_else(|| get_string_value(dcm, IMAGER_PIXEL_SPACING))
        .ok_or_else(|| SliceposError::TagNotFound("PixelSpacing".to_string()))?;

    let spacing = PixelSpacing::parse(&raw).map_err(SliceposError::InvalidValue)?;
    if !spacing.is_valid() {
        return Err(SliceposError::InvalidValue(format!(
            "PixelSpacing must be positive, got '{}'",
            raw
        )));
    }
    Ok(spacing)
}

/// Decodes the first frame of the pixel data as stored
///
/// The modality rescale is not applied: the edge detection thresholds are
/// absolute and expect stored values.
pub fn decode_image(dcm: &DefaultDicomObject) -> Result<Image> {
    let decoded = dcm.decode_pixel_data()?;
    if decoded.samples_per_pixel() != 1 {
        return Err(SliceposError::InvalidValue(format!(
            "expected a single-channel image, got {} samples per pixel",
            decoded.samples_per_pixel()
        )));
    }

    let rows = decoded.rows() as usize;
    let cols = decoded.columns() as usize;
    if let (Some(tag_rows), Some(tag_cols)) = (get_u16_value(dcm, ROWS), get_u16_value(dcm, COLUMNS))
    {
        if tag_rows as usize != rows || tag_cols as usize != cols {
            return Err(SliceposError::InvalidValue(format!(
                "Rows/Columns {} x {} disagree with decoded pixel data {} x {}",
                tag_rows, tag_cols, rows, cols
            )));
        }
    }

    let raw = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
    let samples: Vec<f32> = decoded.to_vec_with_options(&raw)?;
    let frame: Vec<f64> = samples
        .into_iter()
        .take(rows * cols)
        .map(f64::from)
        .collect();
    Grid::from_vec(rows, cols, frame)
}

/// Reads a phantom mask stored as a DICOM image, non-zero pixels are phantom
pub fn load_mask(path: &Path) -> Result<Mask> {
    let dcm = open_file(path)?;
    let image = decode_image(&dcm)?;
    Ok(image.map(|&v| v != 0.0))
}
