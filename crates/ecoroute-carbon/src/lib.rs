// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carbon estimation for routed prompts.
//!
//! Grams of CO2 are derived from a per-provider energy coefficient, a grid
//! intensity and the prompt's token count. The coefficients are design
//! approximations, not measurements.

pub mod estimator;

pub use estimator::{CarbonEstimator, round_to};
