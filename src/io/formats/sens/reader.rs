// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.sens` container reader.
//!
//! The whole container is decoded up front: header first, then every frame
//! record in capture order. Payloads are kept compressed; decoding happens on
//! demand through [`SensorData::depth_samples`], [`SensorData::depth_image`]
//! and [`SensorData::color_image`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use image::{ImageBuffer, Luma, RgbImage};
use tracing::debug;

use super::frame::RgbdFrame;
use super::{SensCursor, FRAME_FIXED_SIZE, SENS_VERSION};
use crate::{CodecError, ColorCompression, DepthCompression, Matrix4, Result};

/// 16-bit single channel depth raster.
pub type DepthImage = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Container header: calibration, codecs and frame geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SensHeader {
    /// Container version (always [`SENS_VERSION`] once parsed)
    pub version: u32,
    /// Name of the capture device
    pub sensor_name: String,
    /// Color camera intrinsics
    pub intrinsic_color: Matrix4,
    /// Color camera extrinsics
    pub extrinsic_color: Matrix4,
    /// Depth camera intrinsics
    pub intrinsic_depth: Matrix4,
    /// Depth camera extrinsics
    pub extrinsic_depth: Matrix4,
    /// Codec of every color payload
    pub color_compression: ColorCompression,
    /// Codec of every depth payload
    pub depth_compression: DepthCompression,
    /// Color image width
    pub color_width: u32,
    /// Color image height
    pub color_height: u32,
    /// Depth image width
    pub depth_width: u32,
    /// Depth image height
    pub depth_height: u32,
    /// Raw depth units per meter
    pub depth_shift: f32,
    /// Name bytes as stored, kept when they are not valid UTF-8
    raw_sensor_name: Option<Vec<u8>>,
}

impl SensHeader {
    /// Header for a container written by this crate.
    pub fn new(
        sensor_name: impl Into<String>,
        color_size: (u32, u32),
        depth_size: (u32, u32),
    ) -> Self {
        Self {
            version: SENS_VERSION,
            sensor_name: sensor_name.into(),
            intrinsic_color: Matrix4::IDENTITY,
            extrinsic_color: Matrix4::IDENTITY,
            intrinsic_depth: Matrix4::IDENTITY,
            extrinsic_depth: Matrix4::IDENTITY,
            color_compression: ColorCompression::Jpeg,
            depth_compression: DepthCompression::ZlibUshort,
            color_width: color_size.0,
            color_height: color_size.1,
            depth_width: depth_size.0,
            depth_height: depth_size.1,
            depth_shift: 1000.0,
            raw_sensor_name: None,
        }
    }

    /// Sensor name bytes to write.
    ///
    /// Names read from a file that were not valid UTF-8 keep their original
    /// bytes until `sensor_name` is changed.
    pub fn sensor_name_bytes(&self) -> &[u8] {
        match &self.raw_sensor_name {
            Some(raw) if String::from_utf8_lossy(raw) == self.sensor_name => raw,
            _ => self.sensor_name.as_bytes(),
        }
    }

    /// Parse the header, returning it with the declared frame count.
    pub(crate) fn parse(cursor: &mut SensCursor<'_>) -> Result<(Self, u64)> {
        let version = cursor.read_u32()?;
        if version != SENS_VERSION {
            return Err(CodecError::version_mismatch(SENS_VERSION, version));
        }

        let name_len = cursor.read_u64()?;
        let name_bytes = cursor.take(name_len)?;
        let (sensor_name, raw_sensor_name) = match std::str::from_utf8(name_bytes) {
            Ok(name) => (name.to_string(), None),
            Err(_) => (
                String::from_utf8_lossy(name_bytes).into_owned(),
                Some(name_bytes.to_vec()),
            ),
        };

        let intrinsic_color = cursor.read_matrix()?;
        let extrinsic_color = cursor.read_matrix()?;
        let intrinsic_depth = cursor.read_matrix()?;
        let extrinsic_depth = cursor.read_matrix()?;

        let color_compression = ColorCompression::from_tag(cursor.read_i32()?)?;
        let depth_compression = DepthCompression::from_tag(cursor.read_i32()?)?;

        let color_width = cursor.read_u32()?;
        let color_height = cursor.read_u32()?;
        let depth_width = cursor.read_u32()?;
        let depth_height = cursor.read_u32()?;
        let depth_shift = cursor.read_f32()?;
        let frame_count = cursor.read_u64()?;

        let header = Self {
            version,
            sensor_name,
            intrinsic_color,
            extrinsic_color,
            intrinsic_depth,
            extrinsic_depth,
            color_compression,
            depth_compression,
            color_width,
            color_height,
            depth_width,
            depth_height,
            depth_shift,
            raw_sensor_name,
        };

        Ok((header, frame_count))
    }
}

/// A fully decoded capture container.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorData {
    header: SensHeader,
    frames: Vec<RgbdFrame>,
}

impl SensorData {
    /// Assemble a container from a header and frames in capture order.
    pub fn new(header: SensHeader, frames: Vec<RgbdFrame>) -> Self {
        Self { header, frames }
    }

    /// Open and decode a `.sens` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CodecError::Io {
            message: format!("Failed to open {}: {e}", path.display()),
        })?;

        let len = file.metadata()?.len();
        if len == 0 {
            return Self::from_bytes(&[]);
        }

        let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(|e| {
            CodecError::parse("SensorData::open", format!("Failed to mmap file: {e}"))
        })?;

        Self::from_bytes(&mmap[..])
    }

    /// Decode a container from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Decode a container held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = SensCursor::new(data);
        let (header, frame_count) = SensHeader::parse(&mut cursor)?;

        debug!(
            sensor = %header.sensor_name,
            color_codec = %header.color_compression,
            depth_codec = %header.depth_compression,
            color_width = header.color_width,
            color_height = header.color_height,
            depth_width = header.depth_width,
            depth_height = header.depth_height,
            frame_count,
            "parsed sens header"
        );

        // Every record needs at least its fixed part; reject impossible counts
        // before reserving memory for them.
        let min_size = frame_count.saturating_mul(FRAME_FIXED_SIZE as u64);
        if min_size > cursor.remaining() as u64 {
            return Err(CodecError::buffer_too_short(
                min_size,
                cursor.remaining() as u64,
                cursor.position(),
            ));
        }

        let mut frames = Vec::with_capacity(frame_count as usize);
        for _ in 0..frame_count {
            frames.push(RgbdFrame::parse(&mut cursor)?);
        }

        if cursor.remaining() > 0 {
            debug!(
                trailing = cursor.remaining(),
                "ignoring bytes after last frame"
            );
        }

        Ok(Self { header, frames })
    }

    /// Container header.
    pub fn header(&self) -> &SensHeader {
        &self.header
    }

    /// Frames in capture order.
    pub fn frames(&self) -> &[RgbdFrame] {
        &self.frames
    }

    /// Number of frames in the container.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame at `index`.
    pub fn frame(&self, index: usize) -> Result<&RgbdFrame> {
        self.frames.get(index).ok_or_else(|| {
            CodecError::invalid_option(
                "frame index",
                format!("{index} out of range ({} frames)", self.frames.len()),
            )
        })
    }

    /// Time between the first and last color timestamps, in microseconds.
    pub fn duration_us(&self) -> u64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp_color.saturating_sub(first.timestamp_color),
            _ => 0,
        }
    }

    /// Total size of all compressed payloads.
    pub fn payload_bytes(&self) -> u64 {
        self.frames
            .iter()
            .map(|f| (f.color_data.len() + f.depth_data.len()) as u64)
            .sum()
    }

    /// Decompressed depth samples of frame `index`, in raw sensor units.
    pub fn depth_samples(&self, index: usize) -> Result<Vec<u16>> {
        self.frame(index)?.decompress_depth(
            self.header.depth_compression,
            self.header.depth_width,
            self.header.depth_height,
        )
    }

    /// Decompressed depth raster of frame `index`.
    pub fn depth_image(&self, index: usize) -> Result<DepthImage> {
        let samples = self.depth_samples(index)?;
        DepthImage::from_raw(self.header.depth_width, self.header.depth_height, samples).ok_or_else(
            || CodecError::decode("depth", "sample count does not match depth dimensions"),
        )
    }

    /// Decompressed color raster of frame `index`.
    pub fn color_image(&self, index: usize) -> Result<RgbImage> {
        self.frame(index)?
            .decompress_color(self.header.color_compression)
    }

    /// Consume the container, returning its parts.
    pub fn into_parts(self) -> (SensHeader, Vec<RgbdFrame>) {
        (self.header, self.frames)
    }
}
