// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Row-major 4x4 matrix used for calibration and camera poses.

use std::fmt;

use crate::{CodecError, Result};

/// A 4x4 single-precision matrix stored in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4(pub [f32; 16]);

impl Matrix4 {
    /// The identity matrix.
    pub const IDENTITY: Matrix4 = Matrix4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Build a matrix from row-major values.
    pub fn from_row_major(values: [f32; 16]) -> Self {
        Matrix4(values)
    }

    /// Row-major values.
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.0
    }

    /// Element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.0[row * 4 + col]
    }

    /// One row of the matrix.
    pub fn row(&self, row: usize) -> [f32; 4] {
        let start = row * 4;
        [
            self.0[start],
            self.0[start + 1],
            self.0[start + 2],
            self.0[start + 3],
        ]
    }

    /// Whether every element is finite.
    ///
    /// Capture tools write `-inf` poses for frames where tracking was lost.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Render as text: four lines of space-separated values with six decimals.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(4 * 4 * 12);
        for row in 0..4 {
            let line: Vec<String> = self.row(row).iter().map(|&v| format_value(v)).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    /// Parse the text produced by [`Matrix4::to_text`].
    pub fn parse_text(text: &str) -> Result<Self> {
        let values: Vec<f32> = text
            .split_whitespace()
            .map(|token| {
                token.parse::<f32>().map_err(|e| {
                    CodecError::parse("Matrix4::parse_text", format!("'{token}': {e}"))
                })
            })
            .collect::<Result<_>>()?;

        let values: [f32; 16] = values.try_into().map_err(|v: Vec<f32>| {
            CodecError::parse(
                "Matrix4::parse_text",
                format!("expected 16 values, found {}", v.len()),
            )
        })?;

        Ok(Matrix4(values))
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Matrix4::IDENTITY
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Format a single value like C's `%f`.
fn format_value(v: f32) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.6}", v)
    }
}
