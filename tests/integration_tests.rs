use std::fs;
use std::path::Path;

use focalcrop::{
    CoordinateOrigin, CropParams, CropRect, Error, FastFeatureLocator, FocalFallback, ImageFormat,
    io::encode_image, iterate_image_files, process_bytes, process_directory_to_path,
    process_file_to_path,
};
use image::{DynamicImage, Rgb, RgbImage};

/// Dark canvas with bright squares `(x, y, side)`; FAST fires on their corners.
fn squares(width: u32, height: u32, blocks: &[(u32, u32, u32)]) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([15, 15, 15]));
    for &(bx, by, side) in blocks {
        for y in by..by + side {
            for x in bx..bx + side {
                img.put_pixel(x, y, Rgb([235, 235, 235]));
            }
        }
    }
    DynamicImage::ImageRgb8(img)
}

/// Landscape 300x150 with features far right: crop clamps to the right edge.
fn landscape() -> DynamicImage {
    squares(300, 150, &[(215, 40, 20), (245, 90, 20)])
}

/// Portrait 150x300 with features near the top: crop clamps to the top edge.
fn portrait() -> DynamicImage {
    squares(150, 300, &[(50, 40, 20), (80, 45, 20)])
}

fn write_source(dir: &Path, name: &str, image: &DynamicImage) {
    let format = ImageFormat::from_path(Path::new(name)).unwrap_or(ImageFormat::Png);
    fs::write(dir.join(name), encode_image(image, format).unwrap()).unwrap();
}

fn small_output() -> CropParams {
    CropParams {
        output_width: 64,
        output_height: 48,
        ..CropParams::default()
    }
}

#[test]
fn single_file_landscape_clamps_right() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "wide.png", &landscape());
    let params = small_output();
    let locator = FastFeatureLocator::new(params.detector);

    let output = dir.path().join("wide_out.png");
    let done =
        process_file_to_path(&dir.path().join("wide.png"), &output, &locator, &params).unwrap();

    assert_eq!(done.record.file_name, "wide.png");
    assert_eq!(done.record.rect, CropRect::new(150, 0, 150, 150));
    assert!(done.keypoints > 0);

    let written = image::open(&output).unwrap();
    assert_eq!((written.width(), written.height()), (64, 48));
}

#[test]
fn single_file_output_extension_picks_the_encoder() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "wide.png", &landscape());
    let params = small_output();
    let locator = FastFeatureLocator::new(params.detector);

    let output = dir.path().join("wide_out.jpg");
    process_file_to_path(&dir.path().join("wide.png"), &output, &locator, &params).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    let written = image::load_from_memory(&bytes).unwrap();
    assert_eq!((written.width(), written.height()), (64, 48));
}

#[test]
fn in_memory_portrait_clamps_top() {
    let bytes = encode_image(&portrait(), ImageFormat::Png).unwrap();
    let params = small_output();
    let locator = FastFeatureLocator::new(params.detector);

    let result = process_bytes(&bytes, ImageFormat::Jpeg, &locator, &params).unwrap();
    assert_eq!(result.rect, CropRect::new(0, 0, 150, 150));
    assert_eq!((result.source_width, result.source_height), (150, 300));

    let data = result.data.unwrap();
    assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    let decoded = image::load_from_memory(&data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}

#[test]
fn batch_processes_images_and_skips_the_rest() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_source(input.path(), "a_wide.png", &landscape());
    write_source(input.path(), "b_tall.jpg", &portrait());
    write_source(input.path(), "c_upper.PNG", &landscape());
    fs::write(input.path().join("notes.txt"), "not an image").unwrap();
    fs::write(input.path().join("d.png.bak"), "backup").unwrap();
    fs::create_dir(input.path().join("nested")).unwrap();

    let params = CropParams {
        export_crop_data: true,
        ..small_output()
    };
    let locator = FastFeatureLocator::new(params.detector);
    let report =
        process_directory_to_path(input.path(), output.path(), &locator, &params, true).unwrap();

    assert_eq!(report.processed, 3);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.errors, 0);
    assert_eq!(report.crop_rows, 3);

    for name in ["a_wide.png", "b_tall.jpg", "c_upper.PNG"] {
        let out = image::open(output.path().join(name)).unwrap();
        assert_eq!((out.width(), out.height()), (64, 48), "{name}");
    }
    assert!(!output.path().join("notes.txt").exists());

    let csv = fs::read_to_string(output.path().join("crop_data.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Filename,X,Y,Width,Height");
    assert_eq!(lines[1], "a_wide.png,150,0,150,150");
    assert!(lines[2].starts_with("b_tall.jpg,0,"));
    assert_eq!(lines[3], "c_upper.PNG,150,0,150,150");
    assert_eq!(lines.len(), 4);
}

#[test]
fn batch_csv_can_use_bottom_left_origin() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_source(input.path(), "tall.png", &portrait());

    let params = CropParams {
        export_image: false,
        export_crop_data: true,
        csv_name: "geometry.csv".to_string(),
        csv_origin: CoordinateOrigin::BottomLeft,
        ..CropParams::default()
    };
    let locator = FastFeatureLocator::new(params.detector);
    let report =
        process_directory_to_path(input.path(), output.path(), &locator, &params, true).unwrap();
    assert_eq!(report.processed, 1);

    // geometry only: no image written
    assert!(!output.path().join("tall.png").exists());
    let csv = fs::read_to_string(output.path().join("geometry.csv")).unwrap();
    assert_eq!(csv, "Filename,X,Y,Width,Height\ntall.png,0,150,150,150\n");
}

#[test]
fn bad_files_are_counted_and_batch_continues() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_source(input.path(), "a_good.png", &landscape());
    fs::write(input.path().join("b_corrupt.png"), b"\x89PNG garbage").unwrap();
    write_source(input.path(), "c_flat.png", &squares(120, 80, &[]));

    let params = small_output();
    let locator = FastFeatureLocator::new(params.detector);
    let report =
        process_directory_to_path(input.path(), output.path(), &locator, &params, true).unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 2);
    let failed: Vec<String> = report
        .failed
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(failed, vec!["b_corrupt.png", "c_flat.png"]);
    assert!(output.path().join("a_good.png").exists());
}

#[test]
fn fail_fast_returns_the_first_error() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_source(input.path(), "a_flat.png", &squares(120, 80, &[]));
    write_source(input.path(), "b_good.png", &landscape());

    let params = small_output();
    let locator = FastFeatureLocator::new(params.detector);
    let err = process_directory_to_path(input.path(), output.path(), &locator, &params, false)
        .unwrap_err();
    assert!(matches!(err, Error::InsufficientFeatures));
    assert!(!output.path().join("b_good.png").exists());
}

#[test]
fn centre_fallback_rescues_featureless_images() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "flat.png", &squares(120, 80, &[]));
    let params = CropParams {
        fallback: FocalFallback::Center,
        ..small_output()
    };
    let locator = FastFeatureLocator::new(params.detector);

    let done = process_file_to_path(
        &dir.path().join("flat.png"),
        &dir.path().join("flat_out.png"),
        &locator,
        &params,
    )
    .unwrap();
    assert_eq!(done.record.rect, CropRect::new(20, 0, 80, 80));
    assert_eq!(done.keypoints, 0);
}

#[test]
fn zero_output_size_fails_before_touching_files() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_source(input.path(), "a.png", &landscape());

    let params = CropParams {
        output_width: 0,
        ..CropParams::default()
    };
    let locator = FastFeatureLocator::new(params.detector);
    let err = process_directory_to_path(input.path(), output.path(), &locator, &params, true)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDimensions { width: 0, .. }));
}

#[test]
fn iterate_lists_only_supported_images_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "b.jpeg", &landscape());
    write_source(dir.path(), "a.png", &landscape());
    fs::write(dir.path().join("c.gif"), "gif").unwrap();

    let names: Vec<String> = iterate_image_files(dir.path())
        .unwrap()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.png", "b.jpeg"]);
}
