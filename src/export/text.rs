// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pose and calibration exporters.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::{ensure_dir, ExportOptions, ExportStats};
use crate::{CodecError, Matrix4, Result, SensorData};

/// Calibration file names, in export order.
pub const INTRINSIC_FILES: [&str; 4] = [
    "intrinsic_color.txt",
    "extrinsic_color.txt",
    "intrinsic_depth.txt",
    "extrinsic_depth.txt",
];

impl SensorData {
    /// Write each selected frame's camera-to-world matrix to `<index>.txt`.
    pub fn export_poses<P: AsRef<Path>>(
        &self,
        output: P,
        options: &ExportOptions,
    ) -> Result<ExportStats> {
        let output = output.as_ref();
        options.validate()?;
        ensure_dir(output)?;

        let selection = options.selection(self.frame_count())?;
        info!(
            "exporting {} of {} camera poses to {}",
            selection.len(),
            self.frame_count() / options.frame_skip,
            output.display()
        );

        let mut stats = ExportStats::default();
        for index in selection {
            stats.selected += 1;
            let path = output.join(format!("{index:06}.txt"));
            if write_matrix_file(&path, &self.frames()[index].camera_to_world)? {
                stats.written += 1;
            } else {
                stats.skipped += 1;
            }
        }

        Ok(stats)
    }

    /// Write the four calibration matrices, once per container.
    pub fn export_intrinsics<P: AsRef<Path>>(&self, output: P) -> Result<ExportStats> {
        let output = output.as_ref();
        ensure_dir(output)?;
        info!("exporting camera intrinsics to {}", output.display());

        let header = self.header();
        let matrices = [
            &header.intrinsic_color,
            &header.extrinsic_color,
            &header.intrinsic_depth,
            &header.extrinsic_depth,
        ];

        let mut stats = ExportStats::default();
        for (name, matrix) in INTRINSIC_FILES.iter().zip(matrices) {
            stats.selected += 1;
            if write_matrix_file(&output.join(name), matrix)? {
                stats.written += 1;
            } else {
                stats.skipped += 1;
            }
        }

        Ok(stats)
    }
}

/// Write `matrix` to `path` unless the file exists; returns whether it wrote.
fn write_matrix_file(path: &Path, matrix: &Matrix4) -> Result<bool> {
    if path.exists() {
        debug!(path = %path.display(), "skipping existing matrix file");
        return Ok(false);
    }
    fs::write(path, matrix.to_text()).map_err(|e| CodecError::Io {
        message: format!("Failed to write {}: {e}", path.display()),
    })?;
    Ok(true)
}
