// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Batch frame extraction for the ScanNet part of the EQA dataset.
//!
//! Extraction runs in two phases:
//! 1. [`plan`] resolves every ScanNet episode of the dataset to its capture
//!    file, failing before any frame is written if one is missing.
//! 2. [`run`] decodes each capture and exports its frames into
//!    `<output_directory>/<episode_history>/`. Scenes write to disjoint
//!    directories, so up to `jobs` of them are processed at once.

pub mod config;

pub use config::{ConfigError, ExtractConfig};

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::dataset::{self, DatasetError};
use crate::export::{ExportOptions, ExportSummary};
use crate::{CodecError, SensorData};

/// Errors raised by batch extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Dataset or scene lookup problem
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// A scene failed to decode or export
    #[error("scene {scene}: {source}")]
    Scene {
        /// Scene name
        scene: String,
        /// Underlying error
        #[source]
        source: CodecError,
    },

    /// Worker pool could not be created
    #[error("failed to create thread pool: {0}")]
    ThreadPool(String),
}

/// One scene to extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneJob {
    /// Episode folder from the dataset
    pub episode: String,
    /// ScanNet scene name
    pub scene: String,
    /// Capture file
    pub sens_path: PathBuf,
    /// Directory receiving the frames
    pub output: PathBuf,
}

/// Per-scene results of a finished run, in plan order.
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Scene name and export outcome
    pub scenes: Vec<(String, ExportSummary)>,
}

impl ExtractReport {
    /// Files written across all scenes.
    pub fn written(&self) -> usize {
        self.scenes.iter().map(|(_, s)| s.total().written).sum()
    }

    /// Files skipped across all scenes.
    pub fn skipped(&self) -> usize {
        self.scenes.iter().map(|(_, s)| s.total().skipped).sum()
    }
}

/// Resolve every ScanNet episode of the dataset to a capture file.
pub fn plan(config: &ExtractConfig) -> Result<Vec<SceneJob>, ExtractError> {
    config.validate()?;
    let items = dataset::load_dataset(&config.dataset)?;
    let scenes = dataset::scannet_scenes(&items)?;

    let jobs = scenes
        .into_iter()
        .map(|(episode, scene)| {
            let sens_path = dataset::scene_path(&config.scannet_root, &scene)?;
            let output = config.output_directory.join(&episode);
            Ok(SceneJob {
                episode,
                scene,
                sens_path,
                output,
            })
        })
        .collect::<Result<Vec<_>, DatasetError>>()?;

    info!(
        scenes = jobs.len(),
        dataset = %config.dataset.display(),
        "planned scannet extraction"
    );
    Ok(jobs)
}

/// Decode one capture and export its frames.
pub fn extract_scene(
    sens_path: &Path,
    output: &Path,
    options: &ExportOptions,
    rgb_only: bool,
) -> crate::Result<ExportSummary> {
    info!("Extracting frames to: {}", output.display());
    let sd = SensorData::open(sens_path)?;
    let summary = sd.export_all(output, options, rgb_only)?;
    info!("Extracting frames to: {} done!", output.display());
    Ok(summary)
}

/// Extract every planned scene, calling `on_scene_done` after each one.
pub fn run<F>(
    config: &ExtractConfig,
    jobs: &[SceneJob],
    on_scene_done: F,
) -> Result<ExtractReport, ExtractError>
where
    F: Fn(&SceneJob) + Sync,
{
    config.validate()?;
    let options = config.export_options();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .thread_name(|index| format!("sens-extract-{}", index))
        .build()
        .map_err(|e| ExtractError::ThreadPool(e.to_string()))?;

    let scenes = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let summary = extract_scene(&job.sens_path, &job.output, &options, config.rgb_only)
                    .map_err(|source| {
                        warn!(
                            scene = %job.scene,
                            path = %job.sens_path.display(),
                            error = %source,
                            fields = ?source.log_fields(),
                            "scene extraction failed"
                        );
                        ExtractError::Scene {
                            scene: job.scene.clone(),
                            source,
                        }
                    })?;
                on_scene_done(job);
                Ok((job.scene.clone(), summary))
            })
            .collect::<Result<Vec<_>, ExtractError>>()
    })?;

    Ok(ExtractReport { scenes })
}
