// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Export of capture frames to conventional files.
//!
//! Every exporter writes into a single directory (created on demand) and
//! skips any output file that already exists, so an interrupted export can
//! simply be re-run:
//!
//! | Exporter                                | Files                                  |
//! |-----------------------------------------|----------------------------------------|
//! | [`SensorData::export_depth_images`]     | `000000-depth.png` (16-bit grayscale)  |
//! | [`SensorData::export_color_images`]     | `000000-rgb.png` or `000000-rgb.jpg`   |
//! | [`SensorData::export_poses`]            | `000000.txt` (camera-to-world)         |
//! | [`SensorData::export_intrinsics`]       | `intrinsic_color.txt` and friends      |
//!
//! Depth is written in raw sensor units; `depth_shift` is not applied.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use senscodec::export::ExportOptions;
//! use senscodec::SensorData;
//!
//! let sd = SensorData::open("scene0000_00.sens")?;
//! let options = ExportOptions::default().with_max_frames(Some(600));
//! let summary = sd.export_all("frames/scene0000_00", &options, false)?;
//! println!("wrote {} color frames", summary.color.written);
//! # Ok(())
//! # }
//! ```

mod images;
pub mod selection;
mod text;

pub use selection::FrameSelection;
pub use text::INTRINSIC_FILES;

use std::fmt;
use std::ops::AddAssign;
use std::path::Path;
use std::str::FromStr;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::{CodecError, Result, SensorData};

/// Target resolution for resized exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageSize {
    /// Create a size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for ImageSize {
    type Err = CodecError;

    /// Parse `WIDTHxHEIGHT`, e.g. `640x480`.
    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| CodecError::invalid_option("image_size", format!("'{s}' is not WIDTHxHEIGHT")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| CodecError::invalid_option("image_size", format!("'{s}': {e}")))
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// File format for exported color frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// Lossless PNG
    #[default]
    Png,
    /// JPEG
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ColorFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ColorFormat::Png => "png",
            ColorFormat::Jpeg => "jpg",
        }
    }

    pub(crate) fn image_format(&self) -> ImageFormat {
        match self {
            ColorFormat::Png => ImageFormat::Png,
            ColorFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

impl FromStr for ColorFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ColorFormat::Png),
            "jpg" | "jpeg" => Ok(ColorFormat::Jpeg),
            other => Err(CodecError::invalid_option(
                "color_format",
                format!("'{other}', expected 'png' or 'jpg'"),
            )),
        }
    }
}

/// Which frames to export and how to shape them.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Export every `frame_skip`-th frame (at least 1)
    pub frame_skip: usize,
    /// Stop after this many exported frames
    pub max_frames: Option<usize>,
    /// Resize images with nearest-neighbor sampling
    pub image_size: Option<ImageSize>,
    /// Format of color frames
    pub color_format: ColorFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            frame_skip: 1,
            max_frames: None,
            image_size: None,
            color_format: ColorFormat::Png,
        }
    }
}

impl ExportOptions {
    /// Set the frame stride.
    pub fn with_frame_skip(mut self, frame_skip: usize) -> Self {
        self.frame_skip = frame_skip;
        self
    }

    /// Set the cap on exported frames.
    pub fn with_max_frames(mut self, max_frames: Option<usize>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Set the resize target.
    pub fn with_image_size(mut self, image_size: Option<ImageSize>) -> Self {
        self.image_size = image_size;
        self
    }

    /// Set the color file format.
    pub fn with_color_format(mut self, color_format: ColorFormat) -> Self {
        self.color_format = color_format;
        self
    }

    /// Check the options before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.frame_skip == 0 {
            return Err(CodecError::invalid_option("frame_skip", "must be at least 1"));
        }
        if let Some(size) = self.image_size {
            if size.width == 0 || size.height == 0 {
                return Err(CodecError::invalid_option(
                    "image_size",
                    format!("{size} has a zero dimension"),
                ));
            }
        }
        Ok(())
    }

    /// Frame indices selected from a container with `frame_count` frames.
    pub fn selection(&self, frame_count: usize) -> Result<FrameSelection> {
        FrameSelection::new(frame_count, self.frame_skip, self.max_frames)
    }
}

/// Outcome of a single exporter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    /// Outputs the selection asked for
    pub selected: usize,
    /// Outputs decoded and written in this run
    pub written: usize,
    /// Outputs that already existed and were left untouched
    pub skipped: usize,
}

impl AddAssign for ExportStats {
    fn add_assign(&mut self, other: Self) {
        self.selected += other.selected;
        self.written += other.written;
        self.skipped += other.skipped;
    }
}

/// Outcome of [`SensorData::export_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Calibration files
    pub intrinsics: ExportStats,
    /// Pose files
    pub poses: ExportStats,
    /// Depth images
    pub depth: ExportStats,
    /// Color images
    pub color: ExportStats,
}

impl ExportSummary {
    /// Sum over every exporter.
    pub fn total(&self) -> ExportStats {
        let mut total = self.intrinsics;
        total += self.poses;
        total += self.depth;
        total += self.color;
        total
    }
}

impl SensorData {
    /// Run every exporter into `output`: intrinsics, poses, depth, then color.
    ///
    /// With `rgb_only` only color frames are exported.
    pub fn export_all<P: AsRef<Path>>(
        &self,
        output: P,
        options: &ExportOptions,
        rgb_only: bool,
    ) -> Result<ExportSummary> {
        let output = output.as_ref();
        options.validate()?;

        let mut summary = ExportSummary::default();
        if !rgb_only {
            summary.intrinsics = self.export_intrinsics(output)?;
            summary.poses = self.export_poses(output, options)?;
            summary.depth = self.export_depth_images(output, options)?;
        }
        summary.color = self.export_color_images(output, options)?;
        Ok(summary)
    }

    /// A new container holding only the frames `options` selects.
    pub fn subsample(&self, options: &ExportOptions) -> Result<SensorData> {
        options.validate()?;
        let frames = options
            .selection(self.frame_count())?
            .map(|i| self.frames()[i].clone())
            .collect();
        Ok(SensorData::new(self.header().clone(), frames))
    }
}

/// Create `output` if it does not exist yet.
pub(crate) fn ensure_dir(output: &Path) -> Result<()> {
    if !output.exists() {
        std::fs::create_dir_all(output).map_err(|e| CodecError::Io {
            message: format!("Failed to create {}: {e}", output.display()),
        })?;
    }
    Ok(())
}
