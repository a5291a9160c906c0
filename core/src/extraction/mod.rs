//! Image source: reading the phantom series and mask from DICOM files

pub mod files;
pub mod series;
pub mod slice;
pub mod tags;

pub use files::{collect_dicom_files, collect_inputs, is_dicom_file};
pub use series::{end_slices, load_series, sort_slices};
pub use slice::{decode_image, extract_pixel_spacing, image_description, load_mask, DicomSlice};
pub use tags::*;
