// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Export command - write frames, poses and calibration of one capture.

use std::path::PathBuf;

use clap::Args;
use senscodec::{ColorFormat, ExportOptions, ExportStats, ImageSize};

use crate::common::{open_sens, Result};

/// Export a capture into a directory.
#[derive(Args, Clone, Debug)]
pub struct ExportCmd {
    /// Input capture (.sens)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Export every n-th frame
    #[arg(long, default_value_t = 1)]
    frame_skip: usize,

    /// Maximum number of frames to export
    #[arg(long)]
    max_frames: Option<usize>,

    /// Resize images to WIDTHxHEIGHT (nearest-neighbor)
    #[arg(long, value_name = "WxH")]
    size: Option<ImageSize>,

    /// Color image format (png, jpg)
    #[arg(long, default_value = "png")]
    color_format: ColorFormat,

    /// Only export color frames
    #[arg(long)]
    rgb_only: bool,
}

impl ExportCmd {
    pub fn run(self) -> Result<()> {
        let sd = open_sens(&self.input)?;
        let options = ExportOptions::default()
            .with_frame_skip(self.frame_skip)
            .with_max_frames(self.max_frames)
            .with_image_size(self.size)
            .with_color_format(self.color_format);

        println!("Exporting: {} -> {}", self.input.display(), self.output.display());
        let summary = sd.export_all(&self.output, &options, self.rgb_only)?;

        if !self.rgb_only {
            print_stats("Intrinsics", &summary.intrinsics);
            print_stats("Poses", &summary.poses);
            print_stats("Depth", &summary.depth);
        }
        print_stats("Color", &summary.color);

        let total = summary.total();
        println!(
            "Done: {} files written, {} already present",
            total.written, total.skipped
        );
        Ok(())
    }
}

fn print_stats(label: &str, stats: &ExportStats) {
    println!(
        "  {:<11} {} written, {} skipped",
        format!("{label}:"),
        stats.written,
        stats.skipped
    );
}
