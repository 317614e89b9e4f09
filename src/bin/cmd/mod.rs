// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod export;
mod extract;
mod inspect;
mod subsample;

pub use export::ExportCmd;
pub use extract::ExtractCmd;
pub use inspect::InspectCmd;
pub use subsample::SubsampleCmd;
