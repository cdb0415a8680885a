// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt classification and tier routing for ecoroute.
//!
//! This crate provides:
//! - [`Prompt`]: trimmed prompt with a whitespace token count
//! - [`keywords::classify`]: whole-word keyword categories
//! - [`CapabilityGate`]: per-provider eligibility
//! - [`ComplexityScorer`]: keyword weights plus a length bonus
//! - [`TierSelector`]: score bands to advisory suggestions
//! - [`TierRouter`]: all of the above over the configured provider table
//!
//! Everything here is pure and synchronous; provider calls live in the cascade.

pub mod gate;
pub mod keywords;
pub mod prompt;
pub mod router;
pub mod scorer;
pub mod selector;

pub use gate::CapabilityGate;
pub use prompt::{Prompt, PromptFeatures, token_count};
pub use router::TierRouter;
pub use scorer::{ComplexityScorer, ScoreReport};
pub use selector::{Band, TierSelector};
