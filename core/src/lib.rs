pub mod api;
pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod extraction;
pub mod measurement;
pub mod signal;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use api::{ImageOutcome, LengthMeasurement, SlicePositionTask, TaskOutcome, TaskResult};
pub use cli::report::TextReport;
#[cfg(feature = "json")]
pub use diagnostics::JsonDiagnostics;
pub use diagnostics::{DiagnosticSink, Diagnostics};
pub use error::{Result, SliceposError};
pub use extraction::{load_mask, load_series, DicomSlice};
pub use measurement::{
    bar_length_difference, measure_slice, ShiftMatch, ShiftMatcher, SliceMeasurement,
    WedgeLocator,
};
pub use types::*;
