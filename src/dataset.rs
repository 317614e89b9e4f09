// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! EQA dataset scene resolution.
//!
//! Each dataset item names the episode it was asked about through
//! `episode_history`, e.g. `scannet-v0/002-scannet-scene0709_00`. Frames for an
//! episode are extracted from the matching ScanNet capture,
//! `<root>/scans/scene0709_00/scene0709_00.sens` (or `scans_test`).

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Subdirectories of a ScanNet root searched for captures, in order.
pub const SCAN_FOLDERS: [&str; 2] = ["scans", "scans_test"];

/// Marker identifying ScanNet episodes.
const SCANNET_MARKER: &str = "scannet";

/// Errors raised while resolving dataset scenes.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Dataset file could not be read
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        /// Dataset path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Dataset file is not the expected JSON
    #[error("failed to parse dataset {}: {source}", .path.display())]
    Json {
        /// Dataset path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// `episode_history` has no usable scene component
    #[error("episode history '{0}' does not name a scene")]
    InvalidEpisode(String),

    /// No capture file exists for the scene
    #[error("scene ({scene}) not found in {}", .root.display())]
    SceneNotFound {
        /// Scene name
        scene: String,
        /// ScanNet root that was searched
        root: PathBuf,
    },
}

/// One question of the EQA dataset; only the fields extraction needs.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetItem {
    /// Episode folder, relative to the frames directory
    pub episode_history: String,
}

/// Load the dataset JSON (a list of items).
pub fn load_dataset(path: &Path) -> Result<Vec<DatasetItem>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Scene name of an episode: the text after the last `-` of its last path
/// component.
pub fn scene_name(episode_history: &str) -> Result<String, DatasetError> {
    let last = episode_history
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let scene = last.rsplit('-').next().unwrap_or_default();
    if scene.is_empty() {
        return Err(DatasetError::InvalidEpisode(episode_history.to_string()));
    }
    Ok(scene.to_string())
}

/// Map every ScanNet episode folder to its scene name, sorted by folder.
pub fn scannet_scenes(items: &[DatasetItem]) -> Result<BTreeMap<String, String>, DatasetError> {
    let folders: BTreeSet<&str> = items
        .iter()
        .map(|item| item.episode_history.as_str())
        .filter(|folder| folder.contains(SCANNET_MARKER))
        .collect();

    folders
        .into_iter()
        .map(|folder| Ok((folder.to_string(), scene_name(folder)?)))
        .collect()
}

/// Locate the `.sens` capture for `scene` under a ScanNet root.
pub fn scene_path(root: &Path, scene: &str) -> Result<PathBuf, DatasetError> {
    SCAN_FOLDERS
        .iter()
        .map(|folder| root.join(folder).join(scene).join(format!("{scene}.sens")))
        .find(|path| path.exists())
        .ok_or_else(|| DatasetError::SceneNotFound {
            scene: scene.to_string(),
            root: root.to_path_buf(),
        })
}
