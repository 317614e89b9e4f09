// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show capture header, frames and calibration.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{format_bytes, format_duration, format_timestamp, open_sens, Result};

/// Inspect capture contents.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show header information and summary
    Info {
        /// Input capture (.sens)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List frame timestamps and payload sizes
    Frames {
        /// Input capture
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of frames to list (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the calibration matrices
    Intrinsics {
        /// Input capture
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Info { input } => cmd_info(input),
            InspectCmd::Frames { input, limit } => cmd_frames(input, limit),
            InspectCmd::Intrinsics { input } => cmd_intrinsics(input),
        }
    }
}

/// Cmd: Show capture info
fn cmd_info(input: PathBuf) -> Result<()> {
    let sd = open_sens(&input)?;
    let header = sd.header();

    println!("=== {} ===", input.display());
    println!("Sensor: {}", header.sensor_name);
    println!("Version: {}", header.version);
    println!(
        "Color: {}x{} ({})",
        header.color_width, header.color_height, header.color_compression
    );
    println!(
        "Depth: {}x{} ({})",
        header.depth_width, header.depth_height, header.depth_compression
    );
    println!("Depth shift: {}", header.depth_shift);
    println!("Frames: {}", sd.frame_count());
    println!("Payload: {}", format_bytes(sd.payload_bytes()));

    if let (Some(first), Some(last)) = (sd.frames().first(), sd.frames().last()) {
        println!("Start: {}", format_timestamp(first.timestamp_color));
        println!("End: {}", format_timestamp(last.timestamp_color));
        println!("Duration: {}", format_duration(sd.duration_us()));
    }

    let lost = sd
        .frames()
        .iter()
        .filter(|f| !f.camera_to_world.is_finite())
        .count();
    if lost > 0 {
        println!("Frames without a valid pose: {}", lost);
    }

    Ok(())
}

/// Cmd: List frames
fn cmd_frames(input: PathBuf, limit: Option<usize>) -> Result<()> {
    let sd = open_sens(&input)?;
    let limit = limit.unwrap_or(sd.frame_count());

    println!("=== Frames in {} ===", input.display());
    println!(
        "{:>6}  {:>16}  {:>16}  {:>10}  {:>10}  pose",
        "index", "color_ts", "depth_ts", "color", "depth"
    );

    for (index, frame) in sd.frames().iter().enumerate().take(limit) {
        println!(
            "{:>6}  {:>16}  {:>16}  {:>10}  {:>10}  {}",
            index,
            frame.timestamp_color,
            frame.timestamp_depth,
            format_bytes(frame.color_data.len() as u64),
            format_bytes(frame.depth_data.len() as u64),
            if frame.camera_to_world.is_finite() {
                "ok"
            } else {
                "invalid"
            }
        );
    }

    if limit < sd.frame_count() {
        println!("... ({} frames total)", sd.frame_count());
    }

    Ok(())
}

/// Cmd: Show calibration
fn cmd_intrinsics(input: PathBuf) -> Result<()> {
    let sd = open_sens(&input)?;
    let header = sd.header();

    for (name, matrix) in [
        ("intrinsic_color", &header.intrinsic_color),
        ("extrinsic_color", &header.extrinsic_color),
        ("intrinsic_depth", &header.intrinsic_depth),
        ("extrinsic_depth", &header.extrinsic_depth),
    ] {
        println!("=== {} ===", name);
        print!("{}", matrix);
        println!();
    }

    Ok(())
}
