//! CSV side file holding one crop rectangle per processed image.
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::types::{CoordinateOrigin, CropRecord};

pub const CSV_HEADER: &str = "Filename,X,Y,Width,Height";

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format one data row. With a bottom-left origin the rectangle is flipped
/// against `image_height` here, on its way out of the crate.
pub fn format_row(record: &CropRecord, origin: CoordinateOrigin, image_height: u32) -> String {
    let rect = match origin {
        CoordinateOrigin::TopLeft => record.rect,
        CoordinateOrigin::BottomLeft => record.rect.flip_y(image_height),
    };
    format!(
        "{},{},{},{},{}",
        escape_field(&record.file_name),
        rect.x,
        rect.y,
        rect.width,
        rect.height
    )
}

/// Append-only writer for the crop data side file.
pub struct CropCsvWriter {
    writer: BufWriter<File>,
    origin: CoordinateOrigin,
    rows: usize,
}

impl CropCsvWriter {
    /// Create (or truncate) `path` and write the header line.
    pub fn create(path: &Path, origin: CoordinateOrigin) -> Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "{CSV_HEADER}")?;
        info!("Writing crop data to {:?}", path);
        Ok(Self {
            writer,
            origin,
            rows: 0,
        })
    }

    /// Open `path` for appending, writing the header only when the file is
    /// new or empty. Earlier rows are kept.
    pub fn append_to(path: &Path, origin: CoordinateOrigin) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let fresh = file.metadata()?.len() == 0;
        let mut writer = BufWriter::new(file);
        if fresh {
            writeln!(writer, "{CSV_HEADER}")?;
        }
        info!("Appending crop data to {:?}", path);
        Ok(Self {
            writer,
            origin,
            rows: 0,
        })
    }

    pub fn append(&mut self, record: &CropRecord, image_height: u32) -> Result<()> {
        writeln!(
            self.writer,
            "{}",
            format_row(record, self.origin, image_height)
        )?;
        self.rows += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}
