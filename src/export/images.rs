// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Depth and color image exporters.

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Pixel};
use tracing::{debug, info};

use super::{ensure_dir, ExportOptions, ExportStats, ImageSize};
use crate::{CodecError, Result, SensorData};

impl SensorData {
    /// Write selected depth frames as 16-bit PNGs named `<index>-depth.png`.
    pub fn export_depth_images<P: AsRef<Path>>(
        &self,
        output: P,
        options: &ExportOptions,
    ) -> Result<ExportStats> {
        let output = output.as_ref();
        options.validate()?;
        ensure_dir(output)?;

        let selection = options.selection(self.frame_count())?;
        info!(
            "exporting {} of {} depth frames to {}",
            selection.len(),
            self.frame_count() / options.frame_skip,
            output.display()
        );

        let mut stats = ExportStats::default();
        for index in selection {
            stats.selected += 1;
            let path = output.join(format!("{index:06}-depth.png"));
            if path.exists() {
                debug!(path = %path.display(), "skipping existing depth frame");
                stats.skipped += 1;
                continue;
            }

            let mut depth = self.depth_image(index)?;
            if let Some(size) = options.image_size {
                depth = resize_nearest(&depth, size)?;
            }
            depth.save_with_format(&path, ImageFormat::Png)?;
            stats.written += 1;
        }

        Ok(stats)
    }

    /// Write selected color frames as `<index>-rgb.<ext>`.
    pub fn export_color_images<P: AsRef<Path>>(
        &self,
        output: P,
        options: &ExportOptions,
    ) -> Result<ExportStats> {
        let output = output.as_ref();
        options.validate()?;
        ensure_dir(output)?;

        let selection = options.selection(self.frame_count())?;
        info!(
            "exporting {} of {} color frames to {}",
            selection.len(),
            self.frame_count() / options.frame_skip,
            output.display()
        );

        let ext = options.color_format.extension();
        let mut stats = ExportStats::default();
        for index in selection {
            stats.selected += 1;
            let path = output.join(format!("{index:06}-rgb.{ext}"));
            if path.exists() {
                debug!(path = %path.display(), "skipping existing color frame");
                stats.skipped += 1;
                continue;
            }

            let mut color = self.color_image(index)?;
            if let Some(size) = options.image_size {
                color = resize_nearest(&color, size)?;
            }
            color.save_with_format(&path, options.color_format.image_format())?;
            stats.written += 1;
        }

        Ok(stats)
    }
}

/// Nearest-neighbor resize taking source index `floor(dst * src_len / dst_len)`
/// on each axis.
fn resize_nearest<P: Pixel>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    size: ImageSize,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>> {
    let (src_width, src_height) = image.dimensions();
    if src_width == 0 || src_height == 0 {
        return Err(CodecError::invalid_option(
            "image_size",
            format!("cannot resize an empty {src_width}x{src_height} image to {size}"),
        ));
    }

    let source_index = |dst: u32, dst_len: u32, src_len: u32| {
        let index = u64::from(dst) * u64::from(src_len) / u64::from(dst_len);
        index.min(u64::from(src_len) - 1) as u32
    };

    Ok(ImageBuffer::from_fn(size.width, size.height, |x, y| {
        *image.get_pixel(
            source_index(x, size.width, src_width),
            source_index(y, size.height, src_height),
        )
    }))
}
