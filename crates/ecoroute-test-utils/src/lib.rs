// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for ecoroute integration tests.
//!
//! Provides scripted mock providers and a harness that assembles a full
//! routing engine without network access.
//!
//! # Components
//!
//! - [`MockProvider`] - provider adapter replaying scripted outcomes
//! - [`TestHarness`] - `EcoRouter` over the configured table with mock adapters

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::MockProvider;
