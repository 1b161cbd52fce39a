// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-character storage for a paragraph.

mod run;

pub use run::CharacterRun;

use crate::style::FormatRef;

/// Character hosting a [`CustomItem`].
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Soft hyphen: an invisible break opportunity that renders as a hyphen when used.
pub const SOFT_HYPHEN: char = '\u{AD}';

bitflags::bitflags! {
    /// Properties of a character computed by analysis and formatting.
    #[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
    pub struct CharFlags: u8 {
        /// First character of a line. Set by the formatter.
        const LINE_START = 1 << 0;
        /// Resolved embedding level is odd.
        const RIGHT_TO_LEFT = 1 << 1;
        /// Format or direction differs from the previous character.
        const START_OF_RUN = 1 << 2;
        /// A cursor may be placed before this character.
        const CHAR_STOP = 1 << 3;
        /// Whitespace, including no-break spaces.
        const WHITE_SPACE = 1 << 4;
        /// A line may break before this character.
        const SOFT_BREAK = 1 << 5;
    }
}

/// Where a custom item is placed relative to the text around it.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum Placement {
    /// In the line, like a glyph.
    #[default]
    Inline,
    /// Floated to the left edge; text wraps on its right.
    Left,
    /// Floated to the right edge; text wraps on its left.
    Right,
}

/// An inline object embedded at a character position.
///
/// Dimensions are in layout units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomItem {
    /// Host-assigned identifier, used for registration and lookup.
    pub id: u64,
    /// Width of the item.
    pub width: i32,
    /// Height of the item.
    pub height: i32,
    /// Distance from the top of the item to its baseline.
    pub ascent: i32,
    /// Inline or floating placement.
    pub placement: Placement,
    /// Whether the item takes a line of its own.
    pub own_line: bool,
    /// Horizontal position within the paragraph. Set by formatting.
    pub x: i32,
    /// Vertical position within the paragraph. Set by formatting.
    pub y: i32,
}

impl CustomItem {
    /// Creates an inline item of the given size whose baseline is at its bottom.
    pub fn new(id: u64, width: i32, height: i32) -> Self {
        Self {
            id,
            width,
            height,
            ascent: height,
            placement: Placement::Inline,
            own_line: false,
            x: 0,
            y: 0,
        }
    }

    /// Whether the item floats beside the text instead of flowing with it.
    pub fn is_floating(&self) -> bool {
        self.placement != Placement::Inline
    }
}

/// One slot of a [`CharacterRun`].
#[derive(Clone, Debug)]
pub struct TextChar {
    pub(crate) ch: char,
    pub(crate) format: FormatRef,
    pub(crate) custom: Option<CustomItem>,
    pub(crate) x: i32,
    pub(crate) width: i32,
    pub(crate) flags: CharFlags,
    pub(crate) bidi_level: u8,
    pub(crate) underline_width: f64,
}

impl TextChar {
    pub(crate) fn new(ch: char, format: FormatRef) -> Self {
        Self {
            ch,
            format,
            custom: None,
            x: 0,
            width: 0,
            flags: CharFlags::empty(),
            bidi_level: 0,
            underline_width: 0.,
        }
    }

    /// The code point.
    pub fn ch(&self) -> char {
        self.ch
    }

    /// The character's format.
    pub fn format(&self) -> &FormatRef {
        &self.format
    }

    /// The hosted custom item, if any.
    pub fn custom_item(&self) -> Option<&CustomItem> {
        self.custom.as_ref()
    }

    /// Whether this slot hosts a custom item.
    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// Offset from the paragraph's left edge, in layout units.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Advance width in layout units, including any justification stretch.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Analysis and formatting flags.
    pub fn flags(&self) -> CharFlags {
        self.flags
    }

    /// Whether this character starts a line.
    pub fn is_line_start(&self) -> bool {
        self.flags.contains(CharFlags::LINE_START)
    }

    /// Whether this character belongs to a right-to-left run.
    pub fn is_right_to_left(&self) -> bool {
        self.flags.contains(CharFlags::RIGHT_TO_LEFT)
    }

    /// Whether a cursor may be placed before this character.
    pub fn is_char_stop(&self) -> bool {
        self.flags.contains(CharFlags::CHAR_STOP)
    }

    /// Whether this character is whitespace.
    pub fn is_white_space(&self) -> bool {
        self.flags.contains(CharFlags::WHITE_SPACE)
    }

    /// Resolved bidi embedding level.
    pub fn bidi_level(&self) -> u8 {
        self.bidi_level
    }

    /// Underline stroke width in points, when the format is underlined.
    pub fn underline_width(&self) -> f64 {
        self.underline_width
    }

    /// Whether a line may stretch at this character during justification.
    pub(crate) fn is_stretchable(&self) -> bool {
        self.ch == '\u{A0}' || self.is_white_space()
    }
}
