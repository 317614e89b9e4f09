// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Container read/write tests.
//!
//! Tests cover:
//! - Writing a capture and reading it back from disk
//! - Payload decoding after a round trip
//! - Rejection of foreign versions and truncated files

mod common;

use std::fs;

use common::{capture, depth_value, temp_workspace, write_capture, COLOR_SIZE, DEPTH_SIZE};
use senscodec::{encode, CodecError, ColorCompression, DepthCompression, SensWriter, SensorData};

#[test]
fn test_write_then_open() {
    let (dir, _guard) = temp_workspace("round_trip");
    let path = dir.join("scene0000_00.sens");
    let written = write_capture(&path, 5);

    let read = SensorData::open(&path).unwrap();
    assert_eq!(read, written);
    assert_eq!(read.frame_count(), 5);

    let header = read.header();
    assert_eq!(header.version, 4);
    assert_eq!(header.sensor_name, "StructureSensor");
    assert_eq!(header.color_compression, ColorCompression::Jpeg);
    assert_eq!(header.depth_compression, DepthCompression::ZlibUshort);
    assert_eq!((header.color_width, header.color_height), COLOR_SIZE);
    assert_eq!((header.depth_width, header.depth_height), DEPTH_SIZE);
    assert_eq!(header.depth_shift, 1000.0);
    assert_eq!(header.intrinsic_color.get(0, 2), 319.5);
}

#[test]
fn test_decoded_payloads() {
    let sd = SensorData::from_bytes(&encode(&capture(3)).unwrap()).unwrap();

    let depth = sd.depth_image(2).unwrap();
    assert_eq!(depth.dimensions(), DEPTH_SIZE);
    assert_eq!(depth.get_pixel(0, 0)[0], depth_value(2, 0, 0));
    assert_eq!(depth.get_pixel(3, 2)[0], depth_value(2, 3, 2));

    let color = sd.color_image(1).unwrap();
    assert_eq!(color.dimensions(), COLOR_SIZE);
    // JPEG is lossy; the green channel was encoded as a flat 128
    let green = color.get_pixel(4, 3)[1];
    assert!((120..=136).contains(&green), "green = {green}");

    let frame = sd.frame(1).unwrap();
    assert_eq!(frame.timestamp_color, 33_366);
    assert_eq!(frame.timestamp_depth, 33_376);
    assert_eq!(frame.camera_to_world.get(0, 3), 0.5);
}

#[test]
fn test_streaming_writer_matches_encode() {
    let sd = capture(4);
    let mut writer = SensWriter::new(std::io::Cursor::new(Vec::new()), sd.header()).unwrap();
    for frame in sd.frames() {
        writer.write_frame(frame).unwrap();
    }
    assert_eq!(writer.frames_written(), 4);
    let bytes = writer.finish().unwrap().into_inner();

    assert_eq!(bytes, encode(&sd).unwrap());
}

#[test]
fn test_empty_capture() {
    let (dir, _guard) = temp_workspace("empty_capture");
    let path = dir.join("empty.sens");
    write_capture(&path, 0);

    let sd = SensorData::open(&path).unwrap();
    assert_eq!(sd.frame_count(), 0);
    assert_eq!(sd.duration_us(), 0);
}

#[test]
fn test_version_rejected() {
    let mut bytes = encode(&capture(1)).unwrap();
    bytes[..4].copy_from_slice(&3u32.to_le_bytes());

    let err = SensorData::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        CodecError::VersionMismatch {
            expected: 4,
            found: 3
        }
    ));
    assert!(err.is_format_error());
}

#[test]
fn test_truncated_payload() {
    let (dir, _guard) = temp_workspace("truncated");
    let path = dir.join("truncated.sens");
    write_capture(&path, 2);

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 5]).unwrap();

    let err = SensorData::open(&path).unwrap_err();
    assert!(
        matches!(err, CodecError::BufferTooShort { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn test_truncated_color_payload() {
    let sd = capture(1);
    let bytes = encode(&sd).unwrap();
    let depth_len = sd.frames()[0].depth_data.len();

    // Cut one byte into the color payload
    let cut = bytes.len() - depth_len - 1;
    let err = SensorData::from_bytes(&bytes[..cut]).unwrap_err();
    match err {
        CodecError::BufferTooShort {
            requested,
            available,
            ..
        } => {
            assert_eq!(requested, sd.frames()[0].color_data.len() as u64);
            assert_eq!(available, requested - 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file() {
    let (dir, _guard) = temp_workspace("missing");
    let err = SensorData::open(dir.join("nope.sens")).unwrap_err();
    assert!(matches!(err, CodecError::Io { .. }));
}

#[test]
fn test_zero_length_file() {
    let (dir, _guard) = temp_workspace("zero_length");
    let path = dir.join("zero.sens");
    fs::write(&path, b"").unwrap();

    let err = SensorData::open(&path).unwrap_err();
    assert!(matches!(err, CodecError::BufferTooShort { .. }));
}
