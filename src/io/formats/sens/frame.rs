// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame records and their color/depth payload codecs.

use std::io::{Read, Write};

use byteorder::{ByteOrder, LittleEndian};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

use super::SensCursor;
use crate::{CodecError, ColorCompression, DepthCompression, Matrix4, Result};

/// One RGB-D frame as stored in the container.
///
/// Payloads stay compressed until an exporter asks for them.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbdFrame {
    /// Camera-to-world pose
    pub camera_to_world: Matrix4,
    /// Color capture time (microseconds)
    pub timestamp_color: u64,
    /// Depth capture time (microseconds)
    pub timestamp_depth: u64,
    /// Compressed color payload
    pub color_data: Vec<u8>,
    /// Compressed depth payload
    pub depth_data: Vec<u8>,
}

impl RgbdFrame {
    /// Create a frame from already compressed payloads.
    pub fn new(
        camera_to_world: Matrix4,
        timestamp_color: u64,
        timestamp_depth: u64,
        color_data: Vec<u8>,
        depth_data: Vec<u8>,
    ) -> Self {
        Self {
            camera_to_world,
            timestamp_color,
            timestamp_depth,
            color_data,
            depth_data,
        }
    }

    /// Parse one frame record, consuming exactly its serialized size.
    pub(crate) fn parse(cursor: &mut SensCursor<'_>) -> Result<Self> {
        let camera_to_world = cursor.read_matrix()?;
        let timestamp_color = cursor.read_u64()?;
        let timestamp_depth = cursor.read_u64()?;
        let color_size = cursor.read_u64()?;
        let depth_size = cursor.read_u64()?;
        let color_data = cursor.take(color_size)?.to_vec();
        let depth_data = cursor.take(depth_size)?.to_vec();

        Ok(Self {
            camera_to_world,
            timestamp_color,
            timestamp_depth,
            color_data,
            depth_data,
        })
    }

    /// Serialized size of this record in bytes.
    pub fn encoded_len(&self) -> u64 {
        (super::FRAME_FIXED_SIZE + self.color_data.len() + self.depth_data.len()) as u64
    }

    /// Decompress the depth payload into row-major `u16` samples.
    pub fn decompress_depth(
        &self,
        codec: DepthCompression,
        width: u32,
        height: u32,
    ) -> Result<Vec<u16>> {
        match codec {
            DepthCompression::ZlibUshort => self.decompress_depth_zlib(width, height),
            DepthCompression::Unknown
            | DepthCompression::RawUshort
            | DepthCompression::OcciUshort => {
                Err(CodecError::unsupported_codec("depth", codec.as_str()))
            }
        }
    }

    fn decompress_depth_zlib(&self, width: u32, height: u32) -> Result<Vec<u16>> {
        let expected = width as usize * height as usize * 2;
        let mut bytes = Vec::with_capacity(expected);
        // Inflate at most one byte past the expected size
        ZlibDecoder::new(self.depth_data.as_slice())
            .take(expected as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| CodecError::decode("zlib", e.to_string()))?;

        if bytes.len() > expected {
            return Err(CodecError::decode(
                "zlib",
                format!(
                    "inflated depth exceeds {} bytes expected for {}x{} u16 samples",
                    expected, width, height
                ),
            ));
        }
        if bytes.len() < expected {
            return Err(CodecError::decode(
                "zlib",
                format!(
                    "inflated depth is {} bytes, expected {} for {}x{} u16 samples",
                    bytes.len(),
                    expected,
                    width,
                    height
                ),
            ));
        }

        let mut samples = vec![0u16; expected / 2];
        LittleEndian::read_u16_into(&bytes, &mut samples);
        Ok(samples)
    }

    /// Decompress the color payload into an RGB raster.
    pub fn decompress_color(&self, codec: ColorCompression) -> Result<RgbImage> {
        match codec {
            ColorCompression::Jpeg => {
                let image = image::load_from_memory_with_format(&self.color_data, ImageFormat::Jpeg)
                    .map_err(|e| CodecError::decode("jpeg", e.to_string()))?;
                Ok(image.into_rgb8())
            }
            ColorCompression::Unknown | ColorCompression::Raw | ColorCompression::Png => {
                Err(CodecError::unsupported_codec("color", codec.as_str()))
            }
        }
    }
}

/// Compress row-major depth samples the way `zlib_ushort` containers store them.
pub fn compress_depth(samples: &[u16]) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; samples.len() * 2];
    LittleEndian::write_u16_into(samples, &mut bytes);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&bytes)
        .map_err(|e| CodecError::encode("zlib", e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| CodecError::encode("zlib", e.to_string()))
}

/// Encode an RGB raster as a JPEG color payload.
pub fn encode_color_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .encode_image(image)
        .map_err(|e| CodecError::encode("jpeg", e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_bytes(color: &[u8], depth: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        for v in Matrix4::IDENTITY.as_slice() {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data.extend_from_slice(&11u64.to_le_bytes());
        data.extend_from_slice(&12u64.to_le_bytes());
        data.extend_from_slice(&(color.len() as u64).to_le_bytes());
        data.extend_from_slice(&(depth.len() as u64).to_le_bytes());
        data.extend_from_slice(color);
        data.extend_from_slice(depth);
        data
    }

    #[test]
    fn test_parse_consumes_exact_record() {
        let mut data = record_bytes(b"rgb", b"dpth");
        data.extend_from_slice(b"next");

        let mut cursor = SensCursor::new(&data);
        let frame = RgbdFrame::parse(&mut cursor).unwrap();
        assert_eq!(frame.camera_to_world, Matrix4::IDENTITY);
        assert_eq!(frame.timestamp_color, 11);
        assert_eq!(frame.timestamp_depth, 12);
        assert_eq!(frame.color_data, b"rgb");
        assert_eq!(frame.depth_data, b"dpth");
        assert_eq!(cursor.position(), frame.encoded_len());
        assert_eq!(cursor.remaining(), 4);
    }

    #[test]
    fn test_parse_truncated_depth_payload() {
        let mut data = record_bytes(b"rgb", b"depth-bytes");
        data.truncate(data.len() - 3);

        let mut cursor = SensCursor::new(&data);
        let err = RgbdFrame::parse(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            CodecError::BufferTooShort {
                requested: 11,
                available: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_depth_zlib_round_trip() {
        let samples: Vec<u16> = (0..12).map(|i| i * 1000 + 7).collect();
        let frame = RgbdFrame::new(
            Matrix4::IDENTITY,
            0,
            0,
            Vec::new(),
            compress_depth(&samples).unwrap(),
        );
        let decoded = frame
            .decompress_depth(DepthCompression::ZlibUshort, 4, 3)
            .unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn test_depth_size_mismatch() {
        let frame = RgbdFrame::new(
            Matrix4::IDENTITY,
            0,
            0,
            Vec::new(),
            compress_depth(&[1, 2, 3]).unwrap(),
        );
        let err = frame
            .decompress_depth(DepthCompression::ZlibUshort, 2, 2)
            .unwrap_err();
        assert!(matches!(err, CodecError::DecodeError { .. }));
    }

    #[test]
    fn test_depth_oversized_stream_rejected() {
        // 1 MiB of samples declared as a single pixel
        let samples = vec![0u16; 1 << 19];
        let frame = RgbdFrame::new(
            Matrix4::IDENTITY,
            0,
            0,
            Vec::new(),
            compress_depth(&samples).unwrap(),
        );
        let err = frame
            .decompress_depth(DepthCompression::ZlibUshort, 1, 1)
            .unwrap_err();
        match err {
            CodecError::DecodeError { codec, message } => {
                assert_eq!(codec, "zlib");
                assert_eq!(
                    message,
                    "inflated depth exceeds 2 bytes expected for 1x1 u16 samples"
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_depth_unsupported_codecs() {
        let frame = RgbdFrame::new(Matrix4::IDENTITY, 0, 0, Vec::new(), vec![0; 8]);
        for codec in [
            DepthCompression::Unknown,
            DepthCompression::RawUshort,
            DepthCompression::OcciUshort,
        ] {
            let err = frame.decompress_depth(codec, 2, 2).unwrap_err();
            assert!(matches!(err, CodecError::UnsupportedCodec { .. }));
        }
    }

    #[test]
    fn test_depth_corrupt_stream() {
        let frame = RgbdFrame::new(Matrix4::IDENTITY, 0, 0, Vec::new(), vec![1, 2, 3, 4]);
        let err = frame
            .decompress_depth(DepthCompression::ZlibUshort, 1, 1)
            .unwrap_err();
        assert!(matches!(err, CodecError::DecodeError { .. }));
    }

    #[test]
    fn test_color_jpeg_round_trip() {
        let image = RgbImage::from_pixel(16, 8, image::Rgb([200, 40, 40]));
        let frame = RgbdFrame::new(
            Matrix4::IDENTITY,
            0,
            0,
            encode_color_jpeg(&image, 95).unwrap(),
            Vec::new(),
        );
        let decoded = frame.decompress_color(ColorCompression::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
        let px = decoded.get_pixel(8, 4);
        assert!(px[0] > 180 && px[1] < 70 && px[2] < 70, "{px:?}");
    }

    #[test]
    fn test_color_unsupported_codecs() {
        let frame = RgbdFrame::new(Matrix4::IDENTITY, 0, 0, vec![0; 4], Vec::new());
        for codec in [
            ColorCompression::Unknown,
            ColorCompression::Raw,
            ColorCompression::Png,
        ] {
            let err = frame.decompress_color(codec).unwrap_err();
            assert!(matches!(err, CodecError::UnsupportedCodec { .. }));
        }
    }
}
