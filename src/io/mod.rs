//! I/O layer: decoding source images and writing PNG/JPEG outputs and the
//! CSV crop-data side file.
pub mod decode;
pub use decode::{decode_image, read_image};

pub mod writers;
pub use writers::{CropCsvWriter, encode_image, write_image};
