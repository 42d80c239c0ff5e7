use image::GrayImage;
use imageproc::corners::{Corner, corners_fast9};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::FeatureLocator;
use crate::error::{Error, Result};
use crate::types::Point2D;

/// Parameters of the [`FastFeatureLocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Intensity difference a ring pixel needs over the centre to count as
    /// brighter or darker.
    pub threshold: u8,
    /// Strongest corners kept per image.
    pub max_keypoints: usize,
    /// Corners closer than this to any border are discarded.
    pub edge_margin: u32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            threshold: 20,
            max_keypoints: 500,
            edge_margin: 31,
        }
    }
}

impl DetectorParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_keypoints == 0 {
            return Err(Error::InvalidArgument {
                arg: "max_keypoints",
                value: self.max_keypoints.to_string(),
            });
        }
        Ok(())
    }
}

/// FAST-9 corner detector with a strongest-N cap.
///
/// Holds no per-call state, so a single instance can serve a whole batch.
#[derive(Debug, Clone, Default)]
pub struct FastFeatureLocator {
    pub params: DetectorParams,
}

impl FastFeatureLocator {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    fn inside_margin(&self, corner: &Corner, width: u32, height: u32) -> bool {
        let m = self.params.edge_margin;
        corner.x >= m
            && corner.y >= m
            && corner.x.saturating_add(m) < width
            && corner.y.saturating_add(m) < height
    }
}

impl FeatureLocator for FastFeatureLocator {
    fn detect(&self, gray: &GrayImage) -> Vec<Point2D> {
        let (width, height) = gray.dimensions();
        let mut corners: Vec<Corner> = corners_fast9(gray, self.params.threshold)
            .into_iter()
            .filter(|c| self.inside_margin(c, width, height))
            .collect();

        // strongest first; stable sort keeps raster order among equal scores
        corners.sort_by(|a, b| b.score.total_cmp(&a.score));
        corners.truncate(self.params.max_keypoints);

        debug!(
            "FAST detected {} keypoints on {}x{} image",
            corners.len(),
            width,
            height
        );

        corners
            .into_iter()
            .map(|Corner { x, y, .. }| Point2D::new(x as f64, y as f64))
            .collect()
    }
}
