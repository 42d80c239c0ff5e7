use image::{ColorType as SourceColor, DynamicImage};
use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};

/// Default JPEG quality.
pub const JPEG_QUALITY: u8 = 75;

fn jpeg_dimension(value: u32) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::Encode(format!("{value} px exceeds the JPEG limit")))
}

/// Encode to baseline JPEG. Gray inputs stay single-channel; everything else
/// is written as 8-bit RGB with any alpha dropped.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let width = jpeg_dimension(image.width())?;
    let height = jpeg_dimension(image.height())?;

    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, quality);
    match image.color() {
        SourceColor::L8 | SourceColor::La8 | SourceColor::L16 | SourceColor::La16 => {
            let gray = image.to_luma8();
            encoder
                .encode(gray.as_raw(), width, height, ColorType::Luma)
                .map_err(Error::encode)?;
        }
        _ => {
            let rgb = image.to_rgb8();
            encoder
                .encode(rgb.as_raw(), width, height, ColorType::Rgb)
                .map_err(Error::encode)?;
        }
    }
    Ok(out)
}
