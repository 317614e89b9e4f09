// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout senscodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling
//! - [`Matrix4`] - Calibration and pose matrices
//! - [`ColorCompression`] / [`DepthCompression`] - Payload codec identifiers

pub mod error;
pub mod matrix;

pub use error::{CodecError, Result};
pub use matrix::Matrix4;

/// Codec used for the color payload of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCompression {
    /// Codec not recorded by the capture tool
    Unknown,
    /// Uncompressed RGB bytes
    Raw,
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
}

impl ColorCompression {
    /// Map a header tag to a codec.
    pub fn from_tag(tag: i32) -> Result<Self> {
        match tag {
            -1 => Ok(ColorCompression::Unknown),
            0 => Ok(ColorCompression::Raw),
            1 => Ok(ColorCompression::Png),
            2 => Ok(ColorCompression::Jpeg),
            other => Err(CodecError::unknown_tag("color compression", other)),
        }
    }

    /// Header tag for this codec.
    pub fn tag(&self) -> i32 {
        match self {
            ColorCompression::Unknown => -1,
            ColorCompression::Raw => 0,
            ColorCompression::Png => 1,
            ColorCompression::Jpeg => 2,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCompression::Unknown => "unknown",
            ColorCompression::Raw => "raw",
            ColorCompression::Png => "png",
            ColorCompression::Jpeg => "jpeg",
        }
    }
}

impl std::fmt::Display for ColorCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codec used for the depth payload of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthCompression {
    /// Codec not recorded by the capture tool
    Unknown,
    /// Uncompressed little-endian u16 samples
    RawUshort,
    /// zlib-deflated little-endian u16 samples
    ZlibUshort,
    /// Occipital proprietary u16 compression
    OcciUshort,
}

impl DepthCompression {
    /// Map a header tag to a codec.
    pub fn from_tag(tag: i32) -> Result<Self> {
        match tag {
            -1 => Ok(DepthCompression::Unknown),
            0 => Ok(DepthCompression::RawUshort),
            1 => Ok(DepthCompression::ZlibUshort),
            2 => Ok(DepthCompression::OcciUshort),
            other => Err(CodecError::unknown_tag("depth compression", other)),
        }
    }

    /// Header tag for this codec.
    pub fn tag(&self) -> i32 {
        match self {
            DepthCompression::Unknown => -1,
            DepthCompression::RawUshort => 0,
            DepthCompression::ZlibUshort => 1,
            DepthCompression::OcciUshort => 2,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DepthCompression::Unknown => "unknown",
            DepthCompression::RawUshort => "raw_ushort",
            DepthCompression::ZlibUshort => "zlib_ushort",
            DepthCompression::OcciUshort => "occi_ushort",
        }
    }
}

impl std::fmt::Display for DepthCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
