//! Python bindings for slicepos
//!
//! Exposes wedge localization, the profile matcher and the full series
//! measurement to Python.

// PyO3 macro expansion trips this lint
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

mod errors;
mod utils;

use errors::*;

use crate::api::{SlicePositionTask, TaskResult};
use crate::diagnostics::JsonDiagnostics;
use crate::extraction::{collect_inputs, load_mask, load_series};
use crate::measurement::WedgeLocator;
use crate::types::{MeasurementConfig, PhantomSize, PixelSpacing};
use utils::{path_to_pathbuf, rows_to_grid};

/// Locate the two wedge profiles in a phantom slice
///
/// Args:
///     image: Pixel rows of the slice
///     mask: Boolean rows, True on phantom material
///     pixel_spacing: (row, column) spacing in mm
///     medium: Whether the medium ACR phantom was imaged (default: False)
///
/// Returns:
///     tuple: (x_left, x_right, y_start, y_end) in pixels
///
/// Raises:
///     InvalidInputError: If the image, mask or spacing is rejected
///     WedgeNotFoundError: If the wedge pair cannot be located
#[pyfunction]
#[pyo3(signature = (image, mask, pixel_spacing, medium=false))]
fn locate_wedges(
    image: Vec<Vec<f64>>,
    mask: Vec<Vec<bool>>,
    pixel_spacing: (f64, f64),
    medium: bool,
) -> PyResult<(usize, usize, usize, usize)> {
    let image = rows_to_grid(image)?;
    let mask = rows_to_grid(mask)?;
    let spacing = PixelSpacing::new(pixel_spacing.0, pixel_spacing.1);

    let window = WedgeLocator::new(PhantomSize::from_medium_flag(medium))
        .locate(&image, &mask, &spacing)
        .map_err(convert_error)?;
    Ok((window.x_left, window.x_right, window.y_start, window.y_end))
}

/// Bar length difference between two wedge profiles in mm
///
/// Args:
///     left: Profile through the left wedge
///     right: Profile through the right wedge
///     res_y: Row spacing in mm
///
/// Raises:
///     InvalidInputError: If the profiles are empty or differ in length
///     MeasurementError: If the profiles cannot be matched
#[pyfunction]
#[pyo3(signature = (left, right, res_y))]
fn bar_length_difference(left: Vec<f64>, right: Vec<f64>, res_y: f64) -> PyResult<f64> {
    crate::measurement::bar_length_difference(&left, &right, res_y).map_err(convert_error)
}

/// Measure the first and last slice of an ACR series
///
/// Args:
///     inputs: DICOM files or directories holding the series
///     mask: Path to the mask image
///     medium: Whether the medium ACR phantom was imaged (default: False)
///     report_dir: Write per-image JSON diagnostics here (default: None)
///
/// Returns:
///     dict: {"task", "file", "measurement", "report_image"?}
///
/// Example:
///     >>> from slicepos import measure_series
///     >>> result = measure_series(["acr/"], "acr_mask.dcm")
///     >>> result["measurement"]["ACR_T1_1_1"]["length difference"]
#[pyfunction]
#[pyo3(signature = (inputs, mask, medium=false, report_dir=None))]
fn measure_series<'py>(
    py: Python<'py>,
    inputs: Vec<Bound<'py, PyAny>>,
    mask: &Bound<'py, PyAny>,
    medium: bool,
    report_dir: Option<&Bound<'py, PyAny>>,
) -> PyResult<PyObject> {
    let inputs = inputs
        .iter()
        .map(path_to_pathbuf)
        .collect::<PyResult<Vec<_>>>()?;
    let mask_path = path_to_pathbuf(mask)?;

    let mut config =
        MeasurementConfig::default().with_phantom_size(PhantomSize::from_medium_flag(medium));
    if let Some(dir) = report_dir {
        config = config.with_report_dir(path_to_pathbuf(dir)?);
    }

    let files = collect_inputs(&inputs)
        .map_err(|e| convert_error(crate::error::SliceposError::IoError(e)))?;
    let slices = load_series(&files).map_err(convert_error)?;
    let mask = load_mask(&mask_path).map_err(convert_error)?;

    let mut task = SlicePositionTask::new(config.clone());
    if let Some(dir) = config.report_dir {
        task = task.with_sink(Box::new(JsonDiagnostics::new(dir).map_err(convert_error)?));
    }

    let result = task.run(&slices, &mask).into_result().map_err(convert_error)?;
    task_result_to_py_dict(py, &result)
}

fn task_result_to_py_dict(py: Python, result: &TaskResult) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    dict.set_item("task", &result.task)?;
    dict.set_item("file", PyList::new_bound(py, &result.file))?;

    let measurement = PyDict::new_bound(py);
    for (description, m) in &result.measurement {
        let entry = PyDict::new_bound(py);
        entry.set_item("length difference", m.length_difference)?;
        measurement.set_item(description, entry)?;
    }
    dict.set_item("measurement", measurement)?;

    if let Some(reports) = &result.report_image {
        let paths: Vec<String> = reports.iter().map(|p| p.display().to_string()).collect();
        dict.set_item("report_image", PyList::new_bound(py, paths))?;
    }

    Ok(dict.into())
}

/// Python module definition
#[pymodule]
fn _slicepos(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("SliceposError", py.get_type_bound::<PySliceposError>())?;
    m.add("DicomError", py.get_type_bound::<PyDicomError>())?;
    m.add(
        "InvalidInputError",
        py.get_type_bound::<PyInvalidInputError>(),
    )?;
    m.add(
        "WedgeNotFoundError",
        py.get_type_bound::<PyWedgeNotFoundError>(),
    )?;
    m.add(
        "MeasurementError",
        py.get_type_bound::<PyMeasurementError>(),
    )?;

    m.add_function(wrap_pyfunction!(locate_wedges, m)?)?;
    m.add_function(wrap_pyfunction!(bar_length_difference, m)?)?;
    m.add_function(wrap_pyfunction!(measure_series, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
