//! Conversions between Python values and slicepos types

use crate::error::SliceposError;
use crate::types::Grid;
use pyo3::prelude::*;
use std::path::PathBuf;

use super::errors::convert_error;

/// Converts a Python path-like object (str or pathlib.Path) to PathBuf
pub fn path_to_pathbuf(path: &Bound<'_, PyAny>) -> PyResult<PathBuf> {
    if let Ok(s) = path.extract::<String>() {
        return Ok(PathBuf::from(s));
    }

    // pathlib.Path
    if let Ok(s) = path.str() {
        let path_str: String = s.extract()?;
        return Ok(PathBuf::from(path_str));
    }

    Err(pyo3::exceptions::PyTypeError::new_err(
        "Path must be a string or path-like object",
    ))
}

/// Builds a grid from a list of equally long rows
pub fn rows_to_grid<T>(rows: Vec<Vec<T>>) -> PyResult<Grid<T>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(convert_error(SliceposError::InvalidInput(
            "rows must all have the same length".to_string(),
        )));
    }
    let data = rows.into_iter().flatten().collect();
    Grid::from_vec(n_rows, n_cols, data).map_err(convert_error)
}
