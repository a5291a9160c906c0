//! Python exception types for slicepos

// create_exception! expands to cfgs pyo3 does not declare
#![allow(unexpected_cfgs)]

use crate::error::SliceposError;
use pyo3::{create_exception, exceptions::PyException, prelude::*};

create_exception!(
    slicepos,
    PySliceposError,
    PyException,
    "Base exception for all slicepos errors"
);

create_exception!(
    slicepos,
    PyDicomError,
    PySliceposError,
    "DICOM reading or decoding error"
);

create_exception!(
    slicepos,
    PyInvalidInputError,
    PySliceposError,
    "Image, mask or pixel spacing rejected before measurement"
);

create_exception!(
    slicepos,
    PyWedgeNotFoundError,
    PySliceposError,
    "The wedge pair could not be located"
);

create_exception!(
    slicepos,
    PyMeasurementError,
    PySliceposError,
    "The wedge profiles could not be matched"
);

/// Maps a SliceposError onto the matching Python exception
pub fn convert_error(err: SliceposError) -> PyErr {
    match err {
        SliceposError::DicomError(msg)
        | SliceposError::TagNotFound(msg)
        | SliceposError::InvalidValue(msg) => PyDicomError::new_err(msg),
        SliceposError::IoError(e) => PyDicomError::new_err(format!("IO error: {}", e)),
        SliceposError::InvalidInput(msg) => PyInvalidInputError::new_err(msg),
        SliceposError::WedgeNotFound(msg) => PyWedgeNotFoundError::new_err(msg),
        e @ (SliceposError::NoTransient
        | SliceposError::Degenerate(_)
        | SliceposError::Measurement { .. }) => PyMeasurementError::new_err(e.to_string()),
        e @ SliceposError::JsonError(_) => PySliceposError::new_err(e.to_string()),
    }
}
