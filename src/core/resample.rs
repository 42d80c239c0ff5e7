//! Pixel resampling: extract a crop window and rescale with bilinear sampling.
//!
//! Everything here is generic over the `image` pixel types, so the output
//! keeps the channel layout and depth of the input.
use image::{DynamicImage, ImageBuffer, Pixel};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::CropRect;

/// Channel types the resampler can blend.
pub trait Channel: Copy {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl Channel for u8 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, u8::MAX as f64) as u8
    }
}

impl Channel for u16 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, u16::MAX as f64) as u16
    }
}

impl Channel for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

type Buffer<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Copy the pixels inside `rect` into a new image.
///
/// A rectangle that leaves the image is an [`Error::OutOfBounds`] rather than
/// being shrunk to fit.
pub fn crop<P>(image: &Buffer<P>, rect: CropRect) -> Result<Buffer<P>>
where
    P: Pixel,
{
    let (width, height) = image.dimensions();
    if !rect.fits_within(width, height) {
        return Err(Error::OutOfBounds {
            rect,
            width,
            height,
        });
    }
    Ok(ImageBuffer::from_fn(rect.width, rect.height, |x, y| {
        *image.get_pixel(rect.x + x, rect.y + y)
    }))
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Bilinear sample at a position in source pixel-index space.
///
/// Pixel `(i, j)` sits at integer coordinates; positions past the last
/// row/column clamp to the edge. Returns `None` for an empty image.
fn sample_at<P>(image: &Buffer<P>, x: f64, y: f64) -> Option<P>
where
    P: Pixel,
    P::Subpixel: Channel,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let x = x.clamp(0.0, (width - 1) as f64);
    let y = y.clamp(0.0, (height - 1) as f64);
    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let p00 = image.get_pixel(x0, y0);
    let p10 = image.get_pixel(x1, y0);
    let p01 = image.get_pixel(x0, y1);
    let p11 = image.get_pixel(x1, y1);

    let mut out = *p00;
    for (i, channel) in out.channels_mut().iter_mut().enumerate() {
        let top = lerp(p00.channels()[i].to_f64(), p10.channels()[i].to_f64(), fx);
        let bottom = lerp(p01.channels()[i].to_f64(), p11.channels()[i].to_f64(), fx);
        *channel = Channel::from_f64(lerp(top, bottom, fy));
    }
    Some(out)
}

/// Bilinear sample at normalized coordinates, `(0, 0)` being the top-left
/// pixel and `(1, 1)` one pixel past the bottom-right one.
pub fn sample_bilinear<P>(image: &Buffer<P>, u: f64, v: f64) -> Option<P>
where
    P: Pixel,
    P::Subpixel: Channel,
{
    let (width, height) = image.dimensions();
    sample_at(image, u * width as f64, v * height as f64)
}

/// Resample `image` to `target_width` x `target_height`.
///
/// Destination pixel `(px, py)` samples the source at `(px / tw, py / th)`
/// in normalized space, i.e. on a half-open `[0, 1)` grid. The last source
/// row and column are therefore under-weighted when shrinking; this keeps
/// output identical to the established tool and is left as is.
///
/// A zero target dimension yields an empty image. An empty source with a
/// non-empty target is [`Error::InvalidDimensions`].
pub fn scale<P>(image: &Buffer<P>, target_width: u32, target_height: u32) -> Result<Buffer<P>>
where
    P: Pixel,
    P::Subpixel: Channel,
{
    if target_width == 0 || target_height == 0 {
        return Ok(ImageBuffer::new(target_width, target_height));
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    debug!(
        "Scaling {}x{} -> {}x{}",
        width, height, target_width, target_height
    );

    // px * width / target_width rather than (px / target_width) * width:
    // same point, but exact when the sizes match
    let step_x = |px: u32| px as f64 * width as f64 / target_width as f64;
    let step_y = |py: u32| py as f64 * height as f64 / target_height as f64;

    let mut out: Buffer<P> = ImageBuffer::new(target_width, target_height);
    for (px, py, pixel) in out.enumerate_pixels_mut() {
        if let Some(sampled) = sample_at(image, step_x(px), step_y(py)) {
            *pixel = sampled;
        }
    }
    Ok(out)
}

/// Apply `$body` to the typed buffer inside a `DynamicImage`, keeping the
/// variant. Layouts without a `Channel` impl are widened to RGBA8 first.
macro_rules! with_buffer {
    ($image:expr, |$buf:ident| $body:expr) => {
        match $image {
            DynamicImage::ImageLuma8($buf) => DynamicImage::ImageLuma8($body),
            DynamicImage::ImageLumaA8($buf) => DynamicImage::ImageLumaA8($body),
            DynamicImage::ImageRgb8($buf) => DynamicImage::ImageRgb8($body),
            DynamicImage::ImageRgba8($buf) => DynamicImage::ImageRgba8($body),
            DynamicImage::ImageLuma16($buf) => DynamicImage::ImageLuma16($body),
            DynamicImage::ImageLumaA16($buf) => DynamicImage::ImageLumaA16($body),
            DynamicImage::ImageRgb16($buf) => DynamicImage::ImageRgb16($body),
            DynamicImage::ImageRgba16($buf) => DynamicImage::ImageRgba16($body),
            DynamicImage::ImageRgb32F($buf) => DynamicImage::ImageRgb32F($body),
            DynamicImage::ImageRgba32F($buf) => DynamicImage::ImageRgba32F($body),
            other => {
                let widened = other.to_rgba8();
                let $buf = &widened;
                DynamicImage::ImageRgba8($body)
            }
        }
    };
}

/// [`crop`] for any decoded image.
pub fn crop_dynamic(image: &DynamicImage, rect: CropRect) -> Result<DynamicImage> {
    Ok(with_buffer!(image, |buf| crop(buf, rect)?))
}

/// [`scale`] for any decoded image.
pub fn scale_dynamic(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
) -> Result<DynamicImage> {
    Ok(with_buffer!(image, |buf| scale(
        buf,
        target_width,
        target_height
    )?))
}
