// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `linewright`.
//!
//! - The `util` module contains fixtures shared by the test modules: a metrics
//!   provider with fixed advances, sample texts and document builders.
//! - Tests only use the public API of `linewright`.
//! - Put the topic of a test at the start of its name, e.g. `wrap_long_word`
//!   rather than `long_word_wraps`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod basic;
mod flow;
mod wrap;
mod util;
