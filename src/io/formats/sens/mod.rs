// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ScanNet `.sens` RGB-D capture format.
//!
//! # Container Structure (Version 4)
//!
//! All integers and floats are little-endian.
//!
//! ## Header
//! - `u32` version (must be 4)
//! - `u64` sensor name length, followed by the name bytes
//! - four row-major `f32[16]` matrices: color intrinsic, color extrinsic,
//!   depth intrinsic, depth extrinsic
//! - `i32` color compression tag, `i32` depth compression tag
//! - `u32` color width/height, `u32` depth width/height
//! - `f32` depth shift (raw depth units per meter)
//! - `u64` frame count
//!
//! ## Frame Record (repeated frame count times)
//! - `f32[16]` camera-to-world pose
//! - `u64` color timestamp, `u64` depth timestamp
//! - `u64` color payload length, `u64` depth payload length
//! - color payload bytes, depth payload bytes
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use senscodec::io::formats::sens::SensorData;
//!
//! let sd = SensorData::open("scene0000_00.sens")?;
//! let depth = sd.depth_image(0)?;
//! println!("{} frames, first depth {}x{}", sd.frame_count(), depth.width(), depth.height());
//! # Ok(())
//! # }
//! ```

pub mod frame;
pub mod reader;
pub mod writer;

pub use frame::{compress_depth, encode_color_jpeg, RgbdFrame};
pub use reader::{SensHeader, SensorData};
pub use writer::{encode, SensWriter};

use byteorder::{ByteOrder, LittleEndian};

use crate::{CodecError, Matrix4, Result};

/// The only container version this crate reads and writes.
pub const SENS_VERSION: u32 = 4;

/// Size of a serialized 4x4 `f32` matrix.
pub const MATRIX_SIZE: usize = 16 * 4;

/// Size of a frame record before its payloads.
pub const FRAME_FIXED_SIZE: usize = MATRIX_SIZE + 4 * 8;

/// Bounds-checked little-endian reader over an in-memory container.
pub(crate) struct SensCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> SensCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current read position.
    pub(crate) fn position(&self) -> u64 {
        self.offset as u64
    }

    /// Bytes left after the current position.
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Borrow the next `len` bytes and advance past them.
    pub(crate) fn take(&mut self, len: u64) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available as u64 {
            return Err(CodecError::buffer_too_short(
                len,
                available as u64,
                self.position(),
            ));
        }
        let len = len as usize;
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub(crate) fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub(crate) fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub(crate) fn read_matrix(&mut self) -> Result<Matrix4> {
        let mut values = [0f32; 16];
        LittleEndian::read_f32_into(self.take(MATRIX_SIZE as u64)?, &mut values);
        Ok(Matrix4(values))
    }
}
