// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File format implementations for RGB-D captures.
//!
//! - [`sens`]: ScanNet `.sens` container support

pub mod sens;
