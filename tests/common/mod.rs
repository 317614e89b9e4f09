// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use senscodec::{compress_depth, encode_color_jpeg, Matrix4, RgbdFrame, SensHeader, SensorData};

// ============================================================================
// Temporary Directories
// ============================================================================

/// Get a unique temporary directory for test files.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let thread_id = format!("{:?}", std::thread::current().id());
    std::env::temp_dir().join(format!(
        "senscodec_{}_{}_{}_{}",
        prefix,
        std::process::id(),
        thread_id.replace(|c: char| !c.is_ascii_alphanumeric(), ""),
        random
    ))
}

/// Create a temporary directory with cleanup guard.
pub fn temp_workspace(prefix: &str) -> (PathBuf, CleanupGuard) {
    let dir = temp_dir(prefix);
    fs::create_dir_all(&dir).unwrap();
    (dir.clone(), CleanupGuard(dir))
}

/// Cleanup guard for test temporary files.
#[derive(Debug)]
pub struct CleanupGuard(pub PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// Synthetic Captures
// ============================================================================

pub const COLOR_SIZE: (u32, u32) = (8, 6);
pub const DEPTH_SIZE: (u32, u32) = (4, 3);

/// Depth sample of `frame` at pixel (x, y).
pub fn depth_value(frame: usize, x: u32, y: u32) -> u16 {
    (1000 + frame * 100 + (y * DEPTH_SIZE.0 + x) as usize) as u16
}

/// Camera pose of `frame`: identity rotation, translated along x.
#[rustfmt::skip]
pub fn pose(frame: usize) -> Matrix4 {
    Matrix4::from_row_major([
        1.0, 0.0, 0.0, frame as f32 * 0.5,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 1.25,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Header with distinct calibration matrices.
#[rustfmt::skip]
pub fn header() -> SensHeader {
    let mut header = SensHeader::new("StructureSensor", COLOR_SIZE, DEPTH_SIZE);
    header.intrinsic_color = Matrix4::from_row_major([
        577.870605, 0.0, 319.5, 0.0,
        0.0, 577.870605, 239.5, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    header.intrinsic_depth = Matrix4::from_row_major([
        288.935303, 0.0, 159.5, 0.0,
        0.0, 288.935303, 119.5, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    header
}

/// One frame with a solid color and a ramp of depth samples.
pub fn frame(index: usize) -> RgbdFrame {
    let shade = (index * 20 % 256) as u8;
    let color = RgbImage::from_pixel(COLOR_SIZE.0, COLOR_SIZE.1, Rgb([shade, 128, 255 - shade]));

    let mut depth = Vec::with_capacity((DEPTH_SIZE.0 * DEPTH_SIZE.1) as usize);
    for y in 0..DEPTH_SIZE.1 {
        for x in 0..DEPTH_SIZE.0 {
            depth.push(depth_value(index, x, y));
        }
    }

    let timestamp = 33_366 * index as u64;
    RgbdFrame::new(
        pose(index),
        timestamp,
        timestamp + 10,
        encode_color_jpeg(&color, 95).unwrap(),
        compress_depth(&depth).unwrap(),
    )
}

/// A decoded capture with `frames` synthetic frames.
pub fn capture(frames: usize) -> SensorData {
    SensorData::new(header(), (0..frames).map(frame).collect())
}

/// Write a synthetic capture to `path`, creating parent directories.
pub fn write_capture(path: &Path, frames: usize) -> SensorData {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let sd = capture(frames);
    sd.write_to_path(path).unwrap();
    sd
}

/// Sorted file names in `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
