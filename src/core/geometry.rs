//! Crop geometry: reduce keypoints to a focal point and derive the square,
//! border-clamped crop window around it.
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{CropRect, Point2D};

/// Centroid of the keypoint set (x and y averaged independently).
///
/// An empty set has no centroid and yields [`Error::InsufficientFeatures`].
pub fn compute_focal_point(keypoints: &[Point2D]) -> Result<Point2D> {
    if keypoints.is_empty() {
        return Err(Error::InsufficientFeatures);
    }

    let n = keypoints.len() as f64;
    let (sum_x, sum_y) = keypoints
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));

    Ok(Point2D::new(sum_x / n, sum_y / n))
}

/// Geometric centre of an image, used when no keypoints are available and the
/// caller opted into a fallback.
pub fn image_center(width: u32, height: u32) -> Point2D {
    Point2D::new(width as f64 / 2.0, height as f64 / 2.0)
}

/// Largest square crop centred on `focal` along the image's long axis.
///
/// Portrait images keep their full width and slide the window vertically;
/// landscape and square images keep their full height and slide horizontally.
/// The offset is clamped to the image in floating point and truncated last.
pub fn compute_crop_rect(image_width: u32, image_height: u32, focal: Point2D) -> Result<CropRect> {
    if image_width == 0 || image_height == 0 {
        return Err(Error::InvalidDimensions {
            width: image_width,
            height: image_height,
        });
    }

    let w = image_width as f64;
    let h = image_height as f64;

    let (x, y, side) = if h > w {
        let mut y = focal.y - w / 2.0;
        if y < 0.0 {
            y = 0.0;
        }
        if y + w > h {
            y = h - w;
        }
        (0.0, y, w)
    } else {
        let mut x = focal.x - h / 2.0;
        if x < 0.0 {
            x = 0.0;
        }
        if x + h > w {
            x = w - h;
        }
        (x, 0.0, h)
    };

    // NaN offsets (non-finite focal input) collapse to 0 under the cast
    let rect = CropRect::new(x as u32, y as u32, side as u32, side as u32);
    debug!(
        "Crop rect for {}x{} around ({:.1}, {:.1}): {}",
        image_width, image_height, focal.x, focal.y, rect
    );
    Ok(rect)
}
