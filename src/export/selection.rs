// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame selection shared by every exporter.

use crate::{CodecError, Result};

/// Iterator over the frame indices `0, stride, 2 * stride, ...` below
/// `frame_count`, stopping after `max_frames` indices.
#[derive(Debug, Clone)]
pub struct FrameSelection {
    next: usize,
    frame_count: usize,
    stride: usize,
    remaining: Option<usize>,
}

impl FrameSelection {
    /// Create a selection; `stride` must be at least 1.
    pub fn new(frame_count: usize, stride: usize, max_frames: Option<usize>) -> Result<Self> {
        if stride == 0 {
            return Err(CodecError::invalid_option(
                "frame_skip",
                "must be at least 1",
            ));
        }
        Ok(Self {
            next: 0,
            frame_count,
            stride,
            remaining: max_frames,
        })
    }

    /// Number of indices this selection yields in total.
    pub fn expected_len(frame_count: usize, stride: usize, max_frames: Option<usize>) -> usize {
        if stride == 0 {
            return 0;
        }
        let available = frame_count.div_ceil(stride);
        match max_frames {
            Some(cap) => available.min(cap),
            None => available,
        }
    }
}

impl Iterator for FrameSelection {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.frame_count || self.remaining == Some(0) {
            return None;
        }
        let index = self.next;
        self.next = self.next.saturating_add(self.stride);
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.next >= self.frame_count {
            0
        } else {
            Self::expected_len(self.frame_count - self.next, self.stride, self.remaining)
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for FrameSelection {}
