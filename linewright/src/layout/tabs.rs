// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

/// How text aligns against a tab stop.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum TabType {
    /// Text starts at the stop.
    #[default]
    Left,
    /// Text is centered on the stop.
    Center,
    /// Text ends at the stop.
    Right,
    /// The alignment character sits on the stop.
    DecimalPoint,
}

/// Leader drawn in the space a tab skips.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum TabFilling {
    /// Nothing.
    #[default]
    Blank,
    /// Dots.
    Dots,
    /// A continuous line.
    Line,
    /// Dashes.
    Dash,
    /// Dashes and dots.
    DashDot,
    /// A dash followed by two dots.
    DashDotDot,
}

/// A tab stop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TabStop {
    /// Position from the paragraph's left edge, in points.
    pub position: f64,
    /// Alignment against the stop.
    pub kind: TabType,
    /// Character aligned on a [`TabType::DecimalPoint`] stop.
    pub align_char: char,
    /// Leader style.
    pub filling: TabFilling,
    /// Leader line width in points.
    pub leader_width: f64,
}

impl TabStop {
    /// A stop at `position` points, with a `.` decimal character and no leader.
    pub fn new(position: f64, kind: TabType) -> Self {
        Self {
            position,
            kind,
            align_char: '.',
            filling: TabFilling::Blank,
            leader_width: 0.,
        }
    }
}

/// Tab stops of a paragraph, ordered by position.
pub type TabList = SmallVec<[TabStop; 4]>;
