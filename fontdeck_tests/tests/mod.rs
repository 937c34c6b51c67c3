// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `fontdeck`.
//!
//! - The `util` module contains shared utility functions that are needed by different
//!   test methods.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that shared utilities are compiled once.
//! - Most tests run against `fontdeck_dev::BlockEngine`, whose glyphs are boxes with exact
//!   pixel metrics. Tests that need a real font live in `system_font.rs` and skip themselves
//!   when no font can be found (set `FONTDECK_TEST_FONT` to point at one).
//! - For test naming, put the "topic" of the test at the start of the name, e.g.
//!   `update_metrics_only_allocates_nothing`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod affirm;
#[macro_use]
mod util;
