//! Core auto-crop building blocks: crop geometry, resampling, the per-image
//! pipeline, and processing parameters. These are consumed by the high-level
//! `api` module.
pub mod geometry;
pub mod params;
pub mod pipeline;
pub mod resample;
