// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # senscodec
//!
//! Reader, writer and frame exporter for ScanNet `.sens` RGB-D captures, used
//! to build the frame folders of an embodied question answering benchmark.
//!
//! ## Architecture
//!
//! - `core/` - Errors, matrices and payload codec identifiers
//! - `io/formats/sens/` - Container parsing, payload decoding and writing
//! - `export/` - Depth, color, pose and calibration exporters
//! - `dataset` - EQA dataset to ScanNet scene resolution
//! - `extract/` - Configurable batch extraction over a dataset
//!
//! ## Example: Exporting a capture
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use senscodec::{ExportOptions, SensorData};
//!
//! let sd = SensorData::open("scene0709_00.sens")?;
//! println!("{} frames from {}", sd.frame_count(), sd.header().sensor_name);
//!
//! let options = ExportOptions::default().with_frame_skip(10);
//! sd.export_color_images("frames/scene0709_00", &options)?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{CodecError, ColorCompression, DepthCompression, Matrix4, Result};

// Capture formats
pub mod io;

pub use io::formats::sens::{
    compress_depth, encode, encode_color_jpeg, RgbdFrame, SensHeader, SensWriter, SensorData,
    SENS_VERSION,
};

// Frame export
pub mod export;

pub use export::{ColorFormat, ExportOptions, ExportStats, ExportSummary, FrameSelection, ImageSize};

// Dataset scene resolution and batch extraction
pub mod dataset;
pub mod extract;
