pub mod report;

use crate::types::{MeasurementConfig, PhantomSize};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for slicepos
#[derive(Parser, Debug)]
#[command(name = "slicepos")]
#[command(about = "ACR phantom slice position measurement from DICOM series")]
#[command(version)]
pub struct Cli {
    /// DICOM files or directories holding the slice series
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// DICOM image whose non-zero pixels mark the phantom
    #[arg(short, long, value_name = "MASK")]
    pub mask: PathBuf,

    /// Medium ACR phantom
    #[arg(long)]
    pub medium: bool,

    /// Write per-image diagnostics into this directory
    #[arg(short, long, value_name = "DIR")]
    pub report: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Measurement configuration selected by the flags
    pub fn measurement_config(&self) -> MeasurementConfig {
        let config = MeasurementConfig::default()
            .with_phantom_size(PhantomSize::from_medium_flag(self.medium));
        match &self.report {
            Some(dir) => config.with_report_dir(dir.clone()),
            None => config,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}
