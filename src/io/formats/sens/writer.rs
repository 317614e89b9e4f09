// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.sens` container writer.
//!
//! The frame count sits in the header, before the frames, so the writer emits
//! a placeholder and patches it in [`SensWriter::finish`].
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use senscodec::io::formats::sens::{compress_depth, RgbdFrame, SensHeader, SensWriter};
//! use senscodec::Matrix4;
//!
//! let header = SensHeader::new("synthetic", (640, 480), (2, 1));
//! let mut writer = SensWriter::create("out.sens", &header)?;
//! let depth = compress_depth(&[1000, 2000])?;
//! writer.write_frame(&RgbdFrame::new(Matrix4::IDENTITY, 0, 0, Vec::new(), depth))?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::frame::RgbdFrame;
use super::reader::{SensHeader, SensorData};
use super::SENS_VERSION;
use crate::{CodecError, Matrix4, Result};

/// Streaming writer for `.sens` containers.
pub struct SensWriter<W: Write + Seek> {
    writer: W,
    /// Offset of the frame count field
    frame_count_pos: u64,
    frames_written: u64,
}

impl SensWriter<BufWriter<File>> {
    /// Create a container file and write its header.
    pub fn create<P: AsRef<Path>>(path: P, header: &SensHeader) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|e| CodecError::Io {
            message: format!("Failed to create {}: {e}", path.as_ref().display()),
        })?;
        Self::new(BufWriter::new(file), header)
    }
}

impl<W: Write + Seek> SensWriter<W> {
    /// Write the header to `writer` and return a writer ready for frames.
    pub fn new(mut writer: W, header: &SensHeader) -> Result<Self> {
        if header.version != SENS_VERSION {
            return Err(CodecError::version_mismatch(SENS_VERSION, header.version));
        }

        let frame_count_pos = write_header(&mut writer, header)?;
        writer.write_u64::<LittleEndian>(0)?;

        Ok(Self {
            writer,
            frame_count_pos,
            frames_written: 0,
        })
    }

    /// Append one frame record.
    pub fn write_frame(&mut self, frame: &RgbdFrame) -> Result<()> {
        write_matrix(&mut self.writer, &frame.camera_to_world)?;
        self.writer.write_u64::<LittleEndian>(frame.timestamp_color)?;
        self.writer.write_u64::<LittleEndian>(frame.timestamp_depth)?;
        self.writer
            .write_u64::<LittleEndian>(frame.color_data.len() as u64)?;
        self.writer
            .write_u64::<LittleEndian>(frame.depth_data.len() as u64)?;
        self.writer.write_all(&frame.color_data)?;
        self.writer.write_all(&frame.depth_data)?;

        self.frames_written += 1;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Patch the frame count, flush, and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        let end = self.writer.stream_position()?;
        self.writer.seek(SeekFrom::Start(self.frame_count_pos))?;
        self.writer.write_u64::<LittleEndian>(self.frames_written)?;
        self.writer.seek(SeekFrom::Start(end))?;
        self.writer.flush()?;

        Ok(self.writer)
    }
}

/// Serialize a whole container into memory.
pub fn encode(data: &SensorData) -> Result<Vec<u8>> {
    let mut writer = SensWriter::new(Cursor::new(Vec::new()), data.header())?;
    for frame in data.frames() {
        writer.write_frame(frame)?;
    }
    Ok(writer.finish()?.into_inner())
}

impl SensorData {
    /// Write the container to `path`.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = SensWriter::create(path, self.header())?;
        for frame in self.frames() {
            writer.write_frame(frame)?;
        }
        writer.finish()?;
        Ok(())
    }
}

/// Write everything up to the frame count; returns the frame count offset.
fn write_header<W: Write + Seek>(writer: &mut W, header: &SensHeader) -> Result<u64> {
    writer.write_u32::<LittleEndian>(header.version)?;
    let name = header.sensor_name_bytes();
    writer.write_u64::<LittleEndian>(name.len() as u64)?;
    writer.write_all(name)?;

    write_matrix(writer, &header.intrinsic_color)?;
    write_matrix(writer, &header.extrinsic_color)?;
    write_matrix(writer, &header.intrinsic_depth)?;
    write_matrix(writer, &header.extrinsic_depth)?;

    writer.write_i32::<LittleEndian>(header.color_compression.tag())?;
    writer.write_i32::<LittleEndian>(header.depth_compression.tag())?;
    writer.write_u32::<LittleEndian>(header.color_width)?;
    writer.write_u32::<LittleEndian>(header.color_height)?;
    writer.write_u32::<LittleEndian>(header.depth_width)?;
    writer.write_u32::<LittleEndian>(header.depth_height)?;
    writer.write_f32::<LittleEndian>(header.depth_shift)?;

    Ok(writer.stream_position()?)
}

fn write_matrix<W: Write>(writer: &mut W, matrix: &Matrix4) -> Result<()> {
    for &v in matrix.as_slice() {
        writer.write_f32::<LittleEndian>(v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_utf8_sensor_name_preserved() {
        let mut bytes = encode(&SensorData::new(
            SensHeader::new("cam?", (2, 2), (2, 2)),
            Vec::new(),
        ))
        .unwrap();
        bytes[15] = 0xff;

        let sd = SensorData::from_bytes(&bytes).unwrap();
        assert_eq!(sd.header().sensor_name, "cam\u{fffd}");
        assert_eq!(sd.header().sensor_name_bytes(), b"cam\xff");
        assert_eq!(encode(&sd).unwrap(), bytes);

        let mut renamed = sd.header().clone();
        renamed.sensor_name = "other".to_string();
        assert_eq!(renamed.sensor_name_bytes(), b"other");
    }

    #[test]
    fn test_header_layout() {
        let header = SensHeader::new("abc", (640, 480), (320, 240));
        let bytes = encode(&SensorData::new(header, Vec::new())).unwrap();

        // version + name + 4 matrices + 2 tags + 4 dims + shift + count
        assert_eq!(bytes.len(), 4 + 8 + 3 + 4 * 64 + 8 + 16 + 4 + 8);
        assert_eq!(&bytes[0..4], &4u32.to_le_bytes());
        assert_eq!(&bytes[4..12], &3u64.to_le_bytes());
        assert_eq!(&bytes[12..15], b"abc");

        let tags = 15 + 4 * 64;
        assert_eq!(&bytes[tags..tags + 4], &2i32.to_le_bytes());
        assert_eq!(&bytes[tags + 4..tags + 8], &1i32.to_le_bytes());
        assert_eq!(&bytes[tags + 8..tags + 12], &640u32.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 8..], &0u64.to_le_bytes());
    }

    #[test]
    fn test_frame_count_patched() {
        let header = SensHeader::new("abc", (1, 1), (1, 1));
        let mut writer = SensWriter::new(Cursor::new(Vec::new()), &header).unwrap();
        let frame = RgbdFrame::new(Matrix4::IDENTITY, 1, 2, vec![9; 5], vec![8; 7]);
        writer.write_frame(&frame).unwrap();
        writer.write_frame(&frame).unwrap();
        assert_eq!(writer.frames_written(), 2);

        let bytes = writer.finish().unwrap().into_inner();
        let count_pos = 4 + 8 + 3 + 4 * 64 + 8 + 16 + 4;
        assert_eq!(&bytes[count_pos..count_pos + 8], &2u64.to_le_bytes());
        assert_eq!(
            bytes.len() as u64,
            count_pos as u64 + 8 + 2 * frame.encoded_len()
        );
    }

    #[test]
    fn test_rejects_foreign_version() {
        let mut header = SensHeader::new("abc", (1, 1), (1, 1));
        header.version = 5;
        assert!(matches!(
            SensWriter::new(Cursor::new(Vec::new()), &header),
            Err(CodecError::VersionMismatch { .. })
        ));
    }
}
