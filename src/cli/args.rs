use clap::Parser;
use std::path::PathBuf;

use focalcrop::{CoordinateOrigin, FocalFallback};

#[derive(Parser, Debug)]
#[command(
    name = "focalcrop",
    version,
    about = "Square-crop images around their feature points and rescale them"
)]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing PNG/JPEG images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output image path (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory; results keep their source file names (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON preset with processing parameters; flags below override it
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Write the effective parameters to a JSON preset file
    #[arg(long)]
    pub save_preset: Option<PathBuf>,

    /// Output width in pixels (default 512)
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels (default 512)
    #[arg(long)]
    pub height: Option<u32>,

    /// Skip writing images; only derive crop geometry
    #[arg(long, default_value_t = false)]
    pub no_image: bool,

    /// Export crop rectangles to a CSV side file
    #[arg(long, default_value_t = false)]
    pub crop_data: bool,

    /// Name of the CSV side file (default crop_data.csv)
    #[arg(long)]
    pub csv_name: Option<String>,

    /// Vertical origin of the Y column in the CSV side file
    #[arg(long, value_enum)]
    pub csv_origin: Option<CoordinateOrigin>,

    /// What to do when an image has no feature points (fail or center)
    #[arg(long, value_enum)]
    pub fallback: Option<FocalFallback>,

    /// FAST intensity threshold (default 20)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Maximum number of keypoints kept per image (default 500)
    #[arg(long)]
    pub max_keypoints: Option<usize>,

    /// Ignore keypoints closer than this many pixels to the border (default 31)
    #[arg(long)]
    pub edge_margin: Option<u32>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: stop at the first file that fails instead of moving on
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
}
