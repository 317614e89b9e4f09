// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Subsample command - write a capture with a subset of the frames.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use senscodec::ExportOptions;

use crate::common::{format_bytes, open_sens, Result};

/// Keep every n-th frame of a capture.
#[derive(Args, Clone, Debug)]
pub struct SubsampleCmd {
    /// Input capture (.sens)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output capture
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Keep every n-th frame
    #[arg(long, default_value_t = 1)]
    frame_skip: usize,

    /// Maximum number of frames to keep
    #[arg(long)]
    max_frames: Option<usize>,
}

impl SubsampleCmd {
    pub fn run(self) -> Result<()> {
        let sd = open_sens(&self.input)?;
        let options = ExportOptions::default()
            .with_frame_skip(self.frame_skip)
            .with_max_frames(self.max_frames);

        let subset = sd.subsample(&options)?;
        subset
            .write_to_path(&self.output)
            .with_context(|| format!("failed to write {}", self.output.display()))?;

        println!(
            "Wrote {} of {} frames ({}) to {}",
            subset.frame_count(),
            sd.frame_count(),
            format_bytes(subset.payload_bytes()),
            self.output.display()
        );
        Ok(())
    }
}
