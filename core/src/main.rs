use clap::Parser;
use log::{error, info};
use slicepos_core::cli::{Cli, OutputFormat};
use slicepos_core::extraction::collect_inputs;
use slicepos_core::{load_mask, load_series, SlicePositionTask, TaskResult, TextReport};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let files = match collect_inputs(&cli.inputs) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to read inputs: {}", e);
            eprintln!("Error: Failed to read inputs: {}", e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        eprintln!("Error: No DICOM files found in the given inputs");
        process::exit(1);
    }

    info!("Found {} DICOM files", files.len());

    let slices = match load_series(&files) {
        Ok(slices) => slices,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mask = match load_mask(&cli.mask) {
        Ok(mask) => mask,
        Err(e) => {
            eprintln!("Error: Failed to read mask {}: {}", cli.mask.display(), e);
            process::exit(1);
        }
    };

    let config = cli.measurement_config();
    info!("Measuring the {} phantom", config.phantom_size);
    let task = with_diagnostics(SlicePositionTask::new(config));

    let result = match task.run(&slices, &mask).into_result() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    output_result(&result, cli.format);
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

#[cfg(feature = "json")]
fn with_diagnostics(task: SlicePositionTask) -> SlicePositionTask {
    let Some(dir) = task.config().report_dir.clone() else {
        return task;
    };
    match slicepos_core::JsonDiagnostics::new(&dir) {
        Ok(sink) => task.with_sink(Box::new(sink)),
        Err(e) => {
            eprintln!("Error: Cannot create report directory {}: {}", dir.display(), e);
            process::exit(1);
        }
    }
}

#[cfg(not(feature = "json"))]
fn with_diagnostics(task: SlicePositionTask) -> SlicePositionTask {
    if task.config().report {
        log::warn!("Diagnostics require the 'json' feature, skipping --report");
    }
    task
}

fn output_result(result: &TaskResult, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(result));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = result;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
