// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font metrics supplied by the host.

use crate::style::TextFormat;

/// Vertical extent of a format, in points.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct VerticalMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f64,
}

impl VerticalMetrics {
    /// Total line box height.
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Glyph measurements for a format.
///
/// All values are in points at 100% zoom; the formatter scales them into layout
/// units. Implementations should return a best-effort value for characters the
/// font lacks rather than failing.
pub trait FontMetrics {
    /// Advance width of `ch` in `format`.
    fn advance(&self, format: &TextFormat, ch: char) -> f64;

    /// Ascent and descent of `format`.
    fn vertical(&self, format: &TextFormat) -> VerticalMetrics;
}

/// Metrics where every character has the same advance and every format the same
/// vertical extent. Useful for tests and for monospaced terminal-like output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedMetrics {
    /// Advance of every character, in points.
    pub advance: f64,
    /// Ascent in points.
    pub ascent: f64,
    /// Descent in points.
    pub descent: f64,
}

impl FixedMetrics {
    /// Creates fixed metrics.
    pub fn new(advance: f64, ascent: f64, descent: f64) -> Self {
        Self {
            advance,
            ascent,
            descent,
        }
    }
}

impl FontMetrics for FixedMetrics {
    fn advance(&self, _format: &TextFormat, ch: char) -> f64 {
        match ch {
            '\n' | '\u{200B}' => 0.,
            _ => self.advance,
        }
    }

    fn vertical(&self, _format: &TextFormat) -> VerticalMetrics {
        VerticalMetrics {
            ascent: self.ascent,
            descent: self.descent,
        }
    }
}
