#![doc = r#"
focalcrop — batch auto-cropping of images around their feature points.

Each image is reduced to a square region of interest and rescaled to a target
resolution. The crop is centred on the centroid of detected keypoints and
clamped to the image, spanning the full length of the shorter side. Crop
geometry can optionally be exported to a CSV side file.

Pipeline per image:

1. a [`FeatureLocator`] finds keypoints on the grayscale image,
2. [`compute_focal_point`] averages them and [`compute_crop_rect`] derives
   the clamped square window,
3. [`crop`] and [`scale`] extract the window and resample it bilinearly.

Quick start: one file
---------------------
```rust,no_run
use std::path::Path;
use focalcrop::{process_file_to_path, CropParams, FastFeatureLocator};

fn main() -> focalcrop::Result<()> {
    let params = CropParams {
        output_width: 256,
        output_height: 256,
        ..CropParams::default()
    };
    let locator = FastFeatureLocator::new(params.detector);

    let done = process_file_to_path(
        Path::new("/photos/portrait.jpg"),
        Path::new("/out/portrait.jpg"),
        &locator,
        &params,
    )?;
    println!("cropped at {}", done.record.rect);
    Ok(())
}
```

Geometry only
-------------
```rust
use focalcrop::{compute_crop_rect, compute_focal_point, CropRect, Point2D};

fn main() -> focalcrop::Result<()> {
    let focal = compute_focal_point(&[Point2D::new(170.0, 20.0), Point2D::new(190.0, 80.0)])?;
    let rect = compute_crop_rect(200, 100, focal)?;
    assert_eq!(rect, CropRect::new(100, 0, 100, 100));
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use focalcrop::{process_directory_to_path, CropParams, FastFeatureLocator};

fn main() -> focalcrop::Result<()> {
    let params = CropParams {
        export_crop_data: true,
        ..CropParams::default()
    };
    let locator = FastFeatureLocator::new(params.detector);

    let report = process_directory_to_path(
        Path::new("/photos"),
        Path::new("/out"),
        &locator,
        &params,
        true, // continue_on_error
    )?;

    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `focalcrop::Result<T>`. Every [`Error`] is scoped to a
single image; the batch helpers log it, count it and move on.

```rust
use focalcrop::{compute_focal_point, Error};

match compute_focal_point(&[]) {
    Err(Error::InsufficientFeatures) => eprintln!("nothing to focus on"),
    other => panic!("unexpected: {other:?}"),
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — geometry, resampling and the per-image pipeline.
- [`detect`] — the `FeatureLocator` seam and the FAST backend.
- [`io`] — decoding and PNG/JPEG/CSV writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod detect;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::CropParams;
pub use error::{Error, Result};
pub use types::{CoordinateOrigin, CropRecord, CropRect, FocalFallback, ImageFormat, Point2D};

// Detection
pub use detect::{DetectorParams, FastFeatureLocator, FeatureLocator};

// Core operations
pub use core::geometry::{compute_crop_rect, compute_focal_point};
pub use core::pipeline::{CropOutcome, auto_crop};
pub use core::resample::{crop, sample_bilinear, scale};

// High-level API re-exports
pub use api::{
    BatchReport, ProcessedFile, ProcessedImage, iterate_image_files, process_bytes,
    process_directory_to_path, process_file_to_path,
};
