// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # senscodec CLI
//!
//! Command-line tool for ScanNet `.sens` RGB-D captures.
//!
//! ## Usage
//!
//! ```sh
//! # Show capture information
//! senscodec inspect info scene0709_00.sens
//!
//! # Export frames, poses and calibration
//! senscodec export scene0709_00.sens frames/scene0709_00 --max-frames 600
//!
//! # Extract every ScanNet scene of the EQA dataset
//! senscodec extract --dataset data/open-eqa-v0.json --scannet-root data/raw/scannet
//!
//! # Write a smaller capture with every 10th frame
//! senscodec subsample scene0709_00.sens small.sens --frame-skip 10
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ExportCmd, ExtractCmd, InspectCmd, SubsampleCmd};
use common::Result;

/// senscodec - RGB-D capture toolkit
///
/// Decode ScanNet .sens captures and export their frames for EQA benchmarks.
#[derive(Parser, Clone)]
#[command(name = "senscodec")]
#[command(about = "RGB-D capture toolkit for ScanNet .sens files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log debug events (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect capture contents (info, frames, intrinsics)
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Export frames, poses and calibration of one capture
    Export(ExportCmd),

    /// Extract frames for every ScanNet scene of an EQA dataset
    Extract(ExtractCmd),

    /// Write a capture holding a subset of the frames
    Subsample(SubsampleCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Export(cmd) => cmd.run(),
        Commands::Extract(cmd) => cmd.run(),
        Commands::Subsample(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
