use std::io::Cursor;

use image::{ColorType, DynamicImage};

use crate::error::{Error, Result};

/// Encode to PNG, keeping the channel layout. Float images have no PNG
/// representation and are stored as 16-bit RGBA.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => {
            DynamicImage::ImageRgba16(image.to_rgba16())
                .write_to(&mut out, image::ImageFormat::Png)
                .map_err(Error::encode)?;
        }
        _ => image
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(Error::encode)?,
    }
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgb32FImage, Rgba, RgbaImage};

    #[test]
    fn png_round_trip_is_lossless() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(5, 3, |x, y| {
            Rgba([x as u8 * 40, y as u8 * 60, 7, 128])
        }));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn float_images_are_widened_to_16_bit() {
        let img = DynamicImage::ImageRgb32F(Rgb32FImage::from_pixel(2, 2, Rgb([0.5, 0.25, 1.0])));
        let decoded = image::load_from_memory(&encode_png(&img).unwrap()).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgba16);
    }
}
