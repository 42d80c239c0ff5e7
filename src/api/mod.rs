//! High-level, ergonomic library API: auto-crop in-memory buffers or files,
//! and batch helpers for whole directories. Prefer these entrypoints over
//! the low-level `core` modules when integrating focalcrop.
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::params::CropParams;
use crate::core::pipeline::auto_crop;
use crate::detect::FeatureLocator;
use crate::error::{Error, Result};
use crate::io::writers::{CropCsvWriter, encode_image, write_image};
use crate::io::{decode_image, read_image};
use crate::types::{CropRect, CropRecord, ImageFormat, Point2D};

/// Result of in-memory processing
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub rect: CropRect,
    pub focal: Point2D,
    pub keypoints: usize,
    pub source_width: u32,
    pub source_height: u32,
    /// Encoded output in the requested format; `None` when image export is off
    pub data: Option<Vec<u8>>,
}

/// Auto-crop an encoded PNG/JPEG held in memory (no disk I/O).
pub fn process_bytes<L>(
    bytes: &[u8],
    format: ImageFormat,
    locator: &L,
    params: &CropParams,
) -> Result<ProcessedImage>
where
    L: FeatureLocator + ?Sized,
{
    let source = decode_image(bytes)?;
    let outcome = auto_crop(&source, locator, params)?;
    let data = match &outcome.image {
        Some(image) => Some(encode_image(image, format)?),
        None => None,
    };

    Ok(ProcessedImage {
        rect: outcome.rect,
        focal: outcome.focal,
        keypoints: outcome.keypoints,
        source_width: source.width(),
        source_height: source.height(),
        data,
    })
}

/// Outcome of processing a single file
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub record: CropRecord,
    pub source_height: u32,
    pub keypoints: usize,
}

/// Auto-crop `input` and, when image export is on, write the result to
/// `output` in the format named by `output`'s extension (or `input`'s when
/// `output` has no PNG/JPEG extension).
pub fn process_file_to_path<L>(
    input: &Path,
    output: &Path,
    locator: &L,
    params: &CropParams,
) -> Result<ProcessedFile>
where
    L: FeatureLocator + ?Sized,
{
    let format = ImageFormat::from_path(output)
        .or_else(|| ImageFormat::from_path(input))
        .ok_or_else(|| Error::UnsupportedFormat(output.display().to_string()))?;
    let source = read_image(input)?;
    let outcome = auto_crop(&source, locator, params)?;

    if let Some(image) = &outcome.image {
        write_image(output, image, format)?;
    }

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ProcessedFile {
        record: CropRecord {
            file_name,
            rect: outcome.rect,
        },
        source_height: source.height(),
        keypoints: outcome.keypoints,
    })
}

/// Batch processing report
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Files that failed, in processing order
    pub failed: Vec<PathBuf>,
    /// Rows written to the CSV side file, if crop data export was on
    pub crop_rows: usize,
}

fn scan_directory(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut images = Vec::new();
    let mut skipped = 0;
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && ImageFormat::from_path(&path).is_some() {
            images.push(path);
        } else {
            skipped += 1;
        }
    }
    images.sort();
    Ok((images, skipped))
}

/// Return the PNG/JPEG files directly inside `input_dir`, sorted by path.
pub fn iterate_image_files(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let (images, _) = scan_directory(input_dir)?;
    Ok(images.into_iter())
}

/// Process every PNG/JPEG in `input_dir` into `output_dir` using `params`.
/// If `continue_on_error` is true, failures are logged and counted and processing continues;
/// otherwise, the first error is returned.
pub fn process_directory_to_path<L>(
    input_dir: &Path,
    output_dir: &Path,
    locator: &L,
    params: &CropParams,
    continue_on_error: bool,
) -> Result<BatchReport>
where
    L: FeatureLocator + ?Sized,
{
    params.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let (images, skipped) = scan_directory(input_dir)?;
    let mut report = BatchReport {
        skipped,
        ..BatchReport::default()
    };

    let mut csv = if params.export_crop_data {
        Some(CropCsvWriter::create(
            &output_dir.join(&params.csv_name),
            params.csv_origin,
        )?)
    } else {
        None
    };

    for path in images {
        let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        let output_path = output_dir.join(&name);
        info!("Processing {:?}", name);

        match process_file_to_path(&path, &output_path, locator, params) {
            Ok(done) => {
                info!(
                    "Cropped {:?} at {} from {} keypoints",
                    name, done.record.rect, done.keypoints
                );
                if let Some(csv) = csv.as_mut() {
                    csv.append(&done.record, done.source_height)?;
                }
                report.processed += 1;
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                report.failed.push(path);
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    if let Some(csv) = csv {
        report.crop_rows = csv.finish()?;
    }

    Ok(report)
}
