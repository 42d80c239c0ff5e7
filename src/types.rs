//! Shared types used across focalcrop.
//! Includes geometry (`Point2D`, `CropRect`), the per-image `CropRecord`,
//! and the option enums (`ImageFormat`, `FocalFallback`, `CoordinateOrigin`).
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A position in image pixel space (origin top-left, y grows downward).
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned crop window in top-left-origin pixel coordinates.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        right <= width as u64 && bottom <= height as u64
    }

    /// Re-express this rectangle for bottom-left-origin pixel storage.
    ///
    /// This is the only place the vertical axis is flipped; callers crossing
    /// into bottom-up coordinates go through here exactly once.
    pub fn flip_y(&self, image_height: u32) -> CropRect {
        CropRect {
            y: image_height.saturating_sub(self.y.saturating_add(self.height)),
            ..*self
        }
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Crop geometry emitted for one processed file.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CropRecord {
    pub file_name: String,
    pub rect: CropRect,
}

/// Container formats read and written by the batch tool.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Select a format from the file extension (`png`, `jpg`, `jpeg`; any case).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// What to do when the detector finds no feature points.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
pub enum FocalFallback {
    /// Fail the image with `InsufficientFeatures`.
    #[default]
    Fail,
    /// Use the geometric centre of the image.
    Center,
}

impl std::fmt::Display for FocalFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FocalFallback::Fail => write!(f, "Fail"),
            FocalFallback::Center => write!(f, "Center"),
        }
    }
}

/// Vertical origin used when writing crop rectangles to the CSV side file.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
pub enum CoordinateOrigin {
    #[default]
    TopLeft,
    BottomLeft,
}
