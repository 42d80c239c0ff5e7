use std::path::Path;

use image::DynamicImage;

use crate::error::{Error, Result};
use crate::types::ImageFormat;

/// Decode an in-memory PNG or JPEG. The container is sniffed from the bytes,
/// so a mislabelled file still decodes.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let format = image::guess_format(bytes).map_err(Error::decode)?;
    match format {
        image::ImageFormat::Png | image::ImageFormat::Jpeg => {
            image::load_from_memory_with_format(bytes, format).map_err(Error::decode)
        }
        other => Err(Error::UnsupportedFormat(format!("{other:?}"))),
    }
}

/// Read and decode an image file whose extension names a supported format.
pub fn read_image(path: &Path) -> Result<DynamicImage> {
    if ImageFormat::from_path(path).is_none() {
        return Err(Error::UnsupportedFormat(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::writers::encode_image;
    use image::{Rgb, RgbImage};

    #[test]
    fn decodes_png_and_jpeg() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 4, Rgb([200, 10, 10])));
        for format in [ImageFormat::Png, ImageFormat::Jpeg] {
            let bytes = encode_image(&img, format).unwrap();
            let decoded = decode_image(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (6, 4), "{format}");
        }
    }

    #[test]
    fn garbage_is_a_decode_failure() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn truncated_png_is_a_decode_failure() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([1, 2, 3])));
        let bytes = encode_image(&img, ImageFormat::Png).unwrap();
        let err = decode_image(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn other_containers_are_unsupported() {
        // minimal GIF header is enough for format sniffing
        let err = decode_image(b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
