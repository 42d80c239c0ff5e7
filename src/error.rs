//! Crate-level error type and `Result` alias.
//! Every variant is a per-image failure: the batch layer reports it and moves
//! on to the next file.
use thiserror::Error;

use crate::types::CropRect;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No feature points detected; cannot derive a focal point")]
    InsufficientFeatures,

    #[error("Crop rectangle {rect} exceeds image bounds {width}x{height}")]
    OutOfBounds {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preset error: {0}")]
    Preset(#[from] serde_json::Error),
}

impl Error {
    pub fn decode<E: std::fmt::Display>(e: E) -> Self {
        Error::Decode(e.to_string())
    }

    pub fn encode<E: std::fmt::Display>(e: E) -> Self {
        Error::Encode(e.to_string())
    }
}
