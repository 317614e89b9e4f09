// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Extract command - export every ScanNet scene of an EQA dataset.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use senscodec::extract::{self, ExtractConfig};
use senscodec::{ColorFormat, ImageSize};

use crate::common::{ProgressBar, Result};

/// Extract frames for the ScanNet episodes of a dataset.
///
/// Flags override values loaded from `--config`.
#[derive(Args, Clone, Debug)]
pub struct ExtractCmd {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// EQA dataset JSON [default: data/open-eqa-v0.json]
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// ScanNet root holding scans/ and scans_test/ [default: data/raw/scannet]
    #[arg(long)]
    scannet_root: Option<PathBuf>,

    /// Output directory [default: data/frames]
    #[arg(long)]
    output_directory: Option<PathBuf>,

    /// Only extract color frames
    #[arg(long)]
    rgb_only: bool,

    /// Maximum frames per scene [default: 600]
    #[arg(long)]
    max_num_frames: Option<usize>,

    /// Export every n-th frame [default: 1]
    #[arg(long)]
    frame_skip: Option<usize>,

    /// Resize images to WIDTHxHEIGHT
    #[arg(long, value_name = "WxH")]
    size: Option<ImageSize>,

    /// Color image format (png, jpg)
    #[arg(long)]
    color_format: Option<ColorFormat>,

    /// Scenes processed in parallel [default: 1]
    #[arg(short, long)]
    jobs: Option<usize>,
}

impl ExtractCmd {
    pub fn run(self) -> Result<()> {
        let config = self.resolve_config()?;
        let jobs = extract::plan(&config)?;

        println!(
            "Extracting {} scenes from {}",
            jobs.len(),
            config.scannet_root.display()
        );

        let progress = ProgressBar::new(jobs.len() as u64, "Scenes");
        let report = extract::run(&config, &jobs, |job| progress.inc(job.scene.clone()))?;
        progress.finish_with_message("done".to_string());

        println!(
            "Done: {} scenes, {} files written, {} already present",
            report.scenes.len(),
            report.written(),
            report.skipped()
        );
        Ok(())
    }

    fn resolve_config(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => ExtractConfig::default(),
        };

        if let Some(dataset) = &self.dataset {
            config.dataset = dataset.clone();
        }
        if let Some(root) = &self.scannet_root {
            config.scannet_root = root.clone();
        }
        if let Some(output) = &self.output_directory {
            config.output_directory = output.clone();
        }
        if self.rgb_only {
            config.rgb_only = true;
        }
        if let Some(max) = self.max_num_frames {
            config.max_num_frames = max;
        }
        if let Some(skip) = self.frame_skip {
            config.frame_skip = skip;
        }
        if let Some(size) = self.size {
            config.image_size = Some(size);
        }
        if let Some(format) = self.color_format {
            config.color_format = format;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }

        config.validate()?;
        Ok(config)
    }
}
