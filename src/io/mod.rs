// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for RGB-D capture formats.

pub mod formats;

pub use formats::sens::{RgbdFrame, SensHeader, SensWriter, SensorData};
