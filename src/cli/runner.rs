use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use focalcrop::io::CropCsvWriter;
use focalcrop::{CropParams, FastFeatureLocator, process_directory_to_path, process_file_to_path};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // a subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn require_path(value: Option<PathBuf>, arg: &str) -> Result<PathBuf, AppError> {
    let path = value.ok_or_else(|| AppError::MissingArgument {
        arg: arg.to_string(),
    })?;
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(AppError::BlankPath {
            arg: arg.to_string(),
        });
    }
    Ok(path)
}

/// Start from the preset (or defaults) and apply command-line overrides.
pub fn build_params(args: &CliArgs) -> Result<CropParams, AppError> {
    let mut params = match &args.preset {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| AppError::PresetRead {
                path: path.clone(),
                source,
            })?;
            CropParams::from_json(&json)?
        }
        None => CropParams::default(),
    };

    if let Some(width) = args.width {
        params.output_width = width;
    }
    if let Some(height) = args.height {
        params.output_height = height;
    }
    if args.no_image {
        params.export_image = false;
    }
    if args.crop_data {
        params.export_crop_data = true;
    }
    if let Some(name) = &args.csv_name {
        params.csv_name = name.clone();
    }
    if let Some(origin) = args.csv_origin {
        params.csv_origin = origin;
    }
    if let Some(fallback) = args.fallback {
        params.fallback = fallback;
    }
    if let Some(threshold) = args.threshold {
        params.detector.threshold = threshold;
    }
    if let Some(max) = args.max_keypoints {
        params.detector.max_keypoints = max;
    }
    if let Some(margin) = args.edge_margin {
        params.detector.edge_margin = margin;
    }

    params.validate()?;
    Ok(params)
}

fn process_single_file(
    input: &Path,
    output: &Path,
    locator: &FastFeatureLocator,
    params: &CropParams,
) -> Result<(), AppError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let done = process_file_to_path(input, output, locator, params)?;
    info!(
        "Cropped {:?} at {} from {} keypoints",
        input, done.record.rect, done.keypoints
    );

    if params.export_crop_data {
        let csv_dir = output.parent().unwrap_or_else(|| Path::new("."));
        let mut csv =
            CropCsvWriter::append_to(&csv_dir.join(&params.csv_name), params.csv_origin)?;
        csv.append(&done.record, done.source_height)?;
        csv.finish()?;
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let params = build_params(&args)?;
    if let Some(path) = &args.save_preset {
        fs::write(path, params.to_json()?)?;
        info!("Saved preset to {:?}", path);
    }

    let locator = FastFeatureLocator::new(params.detector);

    if args.input_dir.is_some() {
        let input_dir = require_path(args.input_dir, "--input-dir")?;
        let output_dir = require_path(args.output_dir, "--output-dir")?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = process_directory_to_path(
            &input_dir,
            &output_dir,
            &locator,
            &params,
            !args.fail_fast,
        )?;

        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
        for failed in &report.failed {
            info!("Failed: {:?}", failed);
        }
    } else {
        let input = require_path(args.input, "--input")?;
        let output = require_path(args.output, "--output")?;

        process_single_file(&input, &output, &locator, &params)?;
        info!("Successfully processed: {:?} -> {:?}", input, output);
    }

    Ok(())
}
