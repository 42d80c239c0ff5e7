use image::DynamicImage;
use tracing::{debug, warn};

use crate::core::geometry::{compute_crop_rect, compute_focal_point, image_center};
use crate::core::params::CropParams;
use crate::core::resample::{crop_dynamic, scale_dynamic};
use crate::detect::FeatureLocator;
use crate::error::{Error, Result};
use crate::types::{CropRect, FocalFallback, Point2D};

/// Result of running one image through detection, geometry and resampling
#[derive(Debug, Clone)]
pub struct CropOutcome {
    pub focal: Point2D,
    pub rect: CropRect,
    /// Number of keypoints the locator reported
    pub keypoints: usize,
    /// Cropped and rescaled pixels; `None` when image export is off
    pub image: Option<DynamicImage>,
}

/// Detect keypoints on the grayscale version of `image` and reduce them to a
/// focal point, applying `fallback` when nothing was found.
pub fn locate_focal_point<L>(
    image: &DynamicImage,
    locator: &L,
    fallback: FocalFallback,
) -> Result<(Point2D, usize)>
where
    L: FeatureLocator + ?Sized,
{
    let gray = image.to_luma8();
    let keypoints = locator.detect(&gray);

    match compute_focal_point(&keypoints) {
        Ok(focal) => Ok((focal, keypoints.len())),
        Err(Error::InsufficientFeatures) if fallback == FocalFallback::Center => {
            warn!("No keypoints found, falling back to the image centre");
            Ok((image_center(image.width(), image.height()), 0))
        }
        Err(e) => Err(e),
    }
}

/// Full per-image pipeline: locator -> crop geometry -> crop + scale.
pub fn auto_crop<L>(image: &DynamicImage, locator: &L, params: &CropParams) -> Result<CropOutcome>
where
    L: FeatureLocator + ?Sized,
{
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if params.export_image && (params.output_width == 0 || params.output_height == 0) {
        return Err(Error::InvalidDimensions {
            width: params.output_width,
            height: params.output_height,
        });
    }

    let (focal, keypoints) = locate_focal_point(image, locator, params.fallback)?;
    let rect = compute_crop_rect(width, height, focal)?;
    debug!(
        "{} keypoints, focal ({:.1}, {:.1}), crop {}",
        keypoints, focal.x, focal.y, rect
    );

    let image = if params.export_image {
        let cropped = crop_dynamic(image, rect)?;
        Some(scale_dynamic(
            &cropped,
            params.output_width,
            params.output_height,
        )?)
    } else {
        None
    };

    Ok(CropOutcome {
        focal,
        rect,
        keypoints,
        image,
    })
}
