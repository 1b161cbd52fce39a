// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linewright is a paragraph layout engine for word-processor style documents.
//!
//! It breaks paragraphs into lines in a fixed-point, zoom-independent coordinate
//! space ("layout units"), justifies and aligns them, resolves tab stops, applies
//! hyphenation, and computes list and chapter numbering labels. Pixel positions
//! are derived from layout units only when a renderer asks for them.
//!
//! Glyph metrics, hyphenation dictionaries and the geometry of the text frame are
//! supplied by the host through the [`FontMetrics`], [`Hyphenator`] and [`Flow`]
//! traits.
//!
//! ## Example
//!
//! ```
//! use linewright::{Document, DocumentConfig, FixedMetrics};
//!
//! let metrics = FixedMetrics::new(1.5, 10.0, 2.0);
//! let mut doc = Document::new(DocumentConfig::default());
//! doc.set_plain_text("Hello world\nSecond paragraph");
//! assert!(doc.format_all(&metrics));
//! assert_eq!(doc.paragraph_count(), 2);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library for float math.
//! - `libm`: Use `core_maths` for float math when `std` is disabled.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("linewright requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod bidi;
mod error;
mod util;

pub mod counter;
pub mod document;
pub mod flow;
pub mod format;
pub mod hyphen;
pub mod layout;
pub mod metrics;
pub mod paragraph;
pub mod style;
pub mod text;
pub mod units;

#[cfg(test)]
mod tests;

pub use peniko::Color;

pub use counter::{CounterAlignment, CounterStyle, Numbering, ParagraphCounter};
pub use document::{Document, DocumentConfig};
pub use error::{Error, ErrorKind};
pub use flow::{Exclusion, Flow, FrameFlow, MarginAdjustment, Side};
pub use format::{FormatContext, FormatOutcome, Formatter, FormatterSettings};
pub use hyphen::{HyphenationPoints, Hyphenator, PatternHyphenator};
pub use layout::{
    Alignment, Border, BorderStyle, Direction, LayoutChanges, LineSpacing, Margins,
    PageBreaking, ParagraphLayout, TabFilling, TabStop, TabType,
};
pub use metrics::{FixedMetrics, FontMetrics, VerticalMetrics};
pub use paragraph::{LineRecord, Paragraph, ParagraphId, Rect};
pub use style::{FormatCollection, FormatRef, TextFormat, UnderlineStyle, VerticalAlign};
pub use text::{CharFlags, CharacterRun, CustomItem, Placement, TextChar};
pub use units::{ZoomConfig, ZoomHandler};
