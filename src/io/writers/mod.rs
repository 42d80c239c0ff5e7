//! Output writers: PNG and JPEG encoders plus the CSV crop-data side file.
use std::fs;
use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::error::Result;
use crate::types::ImageFormat;

pub mod csv;
pub mod jpeg;
pub mod png;

pub use csv::{CSV_HEADER, CropCsvWriter};

/// Encode `image` in the requested container format.
pub fn encode_image(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    match format {
        ImageFormat::Png => png::encode_png(image),
        ImageFormat::Jpeg => jpeg::encode_jpeg(image, jpeg::JPEG_QUALITY),
    }
}

/// Encode and write `image` to `output`, replacing any existing file.
pub fn write_image(output: &Path, image: &DynamicImage, format: ImageFormat) -> Result<()> {
    let bytes = encode_image(image, format)?;
    fs::write(output, &bytes)?;
    debug!("Wrote {} bytes of {} to {:?}", bytes.len(), format, output);
    Ok(())
}
