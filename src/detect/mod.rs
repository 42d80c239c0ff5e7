//! Feature-point detection.
//!
//! The crop engine only needs keypoint positions, so detection sits behind the
//! narrow [`FeatureLocator`] trait. [`FastFeatureLocator`] is the bundled
//! backend; any other detector can be plugged into the pipeline instead.
use image::GrayImage;

use crate::types::Point2D;

pub mod fast;

pub use fast::{DetectorParams, FastFeatureLocator};

/// Pluggable keypoint detection backend.
///
/// Implementations receive a single-channel image with the same dimensions as
/// the source and return keypoint positions in its pixel space, in no
/// particular order. A locator is shared by reference for a whole batch, so
/// any scratch state must be reset per call or guarded internally.
pub trait FeatureLocator: Send + Sync {
    fn detect(&self, gray: &GrayImage) -> Vec<Point2D>;
}
