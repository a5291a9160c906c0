use crate::diagnostics::{DiagnosticSink, Diagnostics};
use crate::error::{Result, SliceposError};
use crate::extraction::{end_slices, DicomSlice};
use crate::measurement::{measure_slice, SliceMeasurement};
use crate::types::{Image, Mask, MeasurementConfig, PixelSpacing};
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Name reported in the `task` field of every result
pub const TASK_NAME: &str = "ACRSlicePosition";

/// Slice position task over the first and last slices of an ACR series
///
/// Each image is measured independently. [`SlicePositionTask::run`] returns
/// one outcome per image; callers decide whether a failure aborts the run
/// ([`TaskOutcome::into_result`]) or is collected.
///
/// # Example
///
/// ```
/// use slicepos_core::{Grid, MeasurementConfig, PixelSpacing, SlicePositionTask};
///
/// // Bright phantom with two dark wedges; the right one is 3 rows longer
/// let inside = |r: usize, c: usize| (20..220).contains(&r) && (40..240).contains(&c);
/// let mask = Grid::from_fn(256, 256, inside);
/// let image = Grid::from_fn(256, 256, |r, c| {
///     if !inside(r, c) {
///         0.0
///     } else if (100..125).contains(&c) && (25..50).contains(&r) {
///         10.0
///     } else if (125..150).contains(&c) && (25..53).contains(&r) {
///         10.0
///     } else {
///         100.0
///     }
/// });
///
/// let task = SlicePositionTask::new(MeasurementConfig::default());
/// let outcome = task.measure_image("ACR_T1_1_1", &image, &mask, PixelSpacing::isotropic(1.0));
/// assert!((outcome.result.unwrap() - 3.0).abs() < 0.2);
/// ```
pub struct SlicePositionTask {
    config: MeasurementConfig,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl SlicePositionTask {
    /// Creates a task without diagnostics
    pub fn new(config: MeasurementConfig) -> Self {
        Self { config, sink: None }
    }

    /// Attaches the collaborator that receives diagnostics when reporting is on
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &MeasurementConfig {
        &self.config
    }

    /// Measures the first and last slice of an ordered series
    pub fn run(&self, slices: &[DicomSlice], mask: &Mask) -> TaskOutcome {
        let images = end_slices(slices)
            .into_iter()
            .map(|slice| self.measure_image(&slice.description, &slice.image, mask, slice.spacing))
            .collect();
        TaskOutcome {
            images,
            report: self.config.report,
        }
    }

    /// Measures one image
    pub fn measure_image(
        &self,
        description: &str,
        image: &Image,
        mask: &Mask,
        spacing: PixelSpacing,
    ) -> ImageOutcome {
        let measured = measure_slice(image, mask, &spacing, &self.config);

        let report_file = match &measured {
            Ok(measurement) => self.report(description, spacing, measurement),
            Err(_) => None,
        };

        let result = measured.map(|m| m.length_difference());
        match &result {
            Ok(length) => info!("{}: length difference {:.2} mm", description, length),
            Err(e) => error!(
                "Could not calculate the bar length difference for {} because of: {}",
                description, e
            ),
        }

        ImageOutcome {
            description: description.to_string(),
            result,
            report_file,
        }
    }

    fn report(
        &self,
        description: &str,
        spacing: PixelSpacing,
        measurement: &SliceMeasurement,
    ) -> Option<PathBuf> {
        if !self.config.report {
            return None;
        }
        let sink = self.sink.as_ref()?;

        let diagnostics = Diagnostics {
            description,
            spacing,
            interp_factor: self.config.matcher.interp_factor,
            measurement,
        };
        match sink.record(&diagnostics) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Could not write diagnostics for {}: {}", description, e);
                None
            }
        }
    }
}

/// Result of measuring one image
#[derive(Debug)]
pub struct ImageOutcome {
    /// Description of the image
    pub description: String,

    /// Bar length difference in mm, or why it could not be measured
    pub result: Result<f64>,

    /// Diagnostics produced for this image
    pub report_file: Option<PathBuf>,
}

/// Per-image outcomes of one task run
#[derive(Debug)]
pub struct TaskOutcome {
    pub images: Vec<ImageOutcome>,

    /// Reporting was requested for this run
    pub report: bool,
}

impl TaskOutcome {
    /// Number of images that failed
    pub fn failure_count(&self) -> usize {
        self.images.iter().filter(|o| o.result.is_err()).count()
    }

    /// Builds the result dictionary, aborting on the first failed image
    ///
    /// # Errors
    ///
    /// Returns `Measurement` naming the first image that failed.
    pub fn into_result(self) -> Result<TaskResult> {
        let mut result = TaskResult::new();
        if self.report {
            result.report_image = Some(Vec::new());
        }
        for outcome in self.images {
            result.file.push(outcome.description.clone());
            let length = outcome
                .result
                .map_err(|e| SliceposError::for_image(outcome.description.clone(), e))?;
            result.measurement.insert(
                outcome.description,
                LengthMeasurement {
                    length_difference: round_to_hundredths(length),
                },
            );
            if let Some(path) = outcome.report_file {
                result.report_image.get_or_insert_with(Vec::new).push(path);
            }
        }
        Ok(result)
    }
}

/// Result dictionary of a slice position run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TaskResult {
    /// Task name
    pub task: String,

    /// Descriptions of the measured images, in measurement order
    pub file: Vec<String>,

    /// Measurement per image description
    pub measurement: BTreeMap<String, LengthMeasurement>,

    /// Diagnostics files, present whenever reporting was requested
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub report_image: Option<Vec<PathBuf>>,
}

impl TaskResult {
    fn new() -> Self {
        Self {
            task: TASK_NAME.to_string(),
            file: Vec::new(),
            measurement: BTreeMap::new(),
            report_image: None,
        }
    }
}

impl Default for TaskResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Bar length difference of one image
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct LengthMeasurement {
    /// Bar length difference in mm, rounded to 2 decimals
    #[cfg_attr(feature = "json", serde(rename = "length difference"))]
    pub length_difference: f64,
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
