// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider cascade and routing engine for ecoroute.
//!
//! - [`ProviderRegistry`]: ordered `{descriptor, gate, adapter}` table
//! - [`collapse_duplicate_lines`]: response postprocessing
//! - [`QualityFilter`]: ordered unhelpfulness heuristics
//! - [`Cascade`]: sequential try-until-accepted orchestration
//! - [`EcoRouter`]: classification, suggestion, routing and provider listing

pub mod cascade;
pub mod engine;
pub mod postprocess;
pub mod quality;
pub mod registry;

pub use cascade::{Answer, Cascade, CascadeOutcome, CascadeSettings};
pub use engine::{EXHAUSTED_MESSAGE, EcoRouter, NO_MODEL};
pub use postprocess::collapse_duplicate_lines;
pub use quality::{QualityFilter, QualityRule, Verdict};
pub use registry::{ProviderEntry, ProviderRegistry, descriptor_from_config};
