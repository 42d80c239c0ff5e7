use serde::{Deserialize, Serialize};

use crate::detect::DetectorParams;
use crate::error::{Error, Result};
use crate::types::{CoordinateOrigin, FocalFallback};

/// Processing parameters suitable for preset files and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropParams {
    pub output_width: u32,
    pub output_height: u32,
    /// Write the cropped, rescaled image to the output directory
    pub export_image: bool,
    /// Append crop geometry to the CSV side file
    pub export_crop_data: bool,
    /// File name of the CSV side file inside the output directory
    pub csv_name: String,
    pub csv_origin: CoordinateOrigin,
    pub fallback: FocalFallback,
    pub detector: DetectorParams,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            output_width: 512,
            output_height: 512,
            export_image: true,
            export_crop_data: false,
            csv_name: "crop_data.csv".to_string(),
            csv_origin: CoordinateOrigin::TopLeft,
            fallback: FocalFallback::Fail,
            detector: DetectorParams::default(),
        }
    }
}

impl CropParams {
    pub fn validate(&self) -> Result<()> {
        if self.export_image && (self.output_width == 0 || self.output_height == 0) {
            return Err(Error::InvalidDimensions {
                width: self.output_width,
                height: self.output_height,
            });
        }
        if self.export_crop_data && self.csv_name.trim().is_empty() {
            return Err(Error::InvalidArgument {
                arg: "csv_name",
                value: self.csv_name.clone(),
            });
        }
        self.detector.validate()
    }

    /// Parse a JSON preset; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
