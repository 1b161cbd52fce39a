// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character formats and the per-document format pool.

mod collection;

pub use collection::{FormatCollection, FormatRef};

use alloc::string::String;
use core::fmt::Write;
use peniko::Color;

use crate::util::color_key;

/// Underline decoration.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum UnderlineStyle {
    /// No underline.
    #[default]
    None,
    /// A single line.
    Single,
    /// Two parallel lines.
    Double,
    /// A single line drawn bold.
    SimpleBold,
    /// A wavy line.
    Wave,
}

impl UnderlineStyle {
    /// Returns `true` for any style that draws a line.
    pub fn is_underlined(self) -> bool {
        self != Self::None
    }
}

/// Vertical placement of characters relative to the baseline.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum VerticalAlign {
    /// On the baseline.
    #[default]
    Normal,
    /// Lowered and reduced in size.
    Subscript,
    /// Raised and reduced in size.
    Superscript,
}

/// A character format.
///
/// Formats are immutable once interned in a [`FormatCollection`]; to change the
/// format of a character, build a new candidate and intern it.
#[derive(Clone, Debug)]
pub struct TextFormat {
    /// Font family name.
    pub family: String,
    /// Font size in points.
    pub point_size: f64,
    /// Font weight, 100 to 900.
    pub weight: u16,
    /// Italic style.
    pub italic: bool,
    /// Text color.
    pub color: Color,
    /// Underline decoration.
    pub underline: UnderlineStyle,
    /// Strikethrough decoration.
    pub strikethrough: bool,
    /// Vertical placement.
    pub vertical_align: VerticalAlign,
    /// BCP 47 language tag, used to select hyphenation patterns.
    pub language: Option<String>,
    /// Whether words in this format may be hyphenated.
    pub hyphenation: bool,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            family: String::from("sans-serif"),
            point_size: 12.0,
            weight: 400,
            italic: false,
            color: Color::BLACK,
            underline: UnderlineStyle::None,
            strikethrough: false,
            vertical_align: VerticalAlign::Normal,
            language: None,
            hyphenation: false,
        }
    }
}

impl TextFormat {
    /// Returns the canonical key identifying this format in a [`FormatCollection`].
    ///
    /// Two formats with the same key render identically.
    pub fn key(&self) -> String {
        let [r, g, b, a] = color_key(self.color);
        let mut key = String::with_capacity(self.family.len() + 48);
        // Writing into a `String` cannot fail.
        let _ = write!(
            key,
            "{}/{}/{}/{}/{:02x}{:02x}{:02x}{:02x}/{}/{}/{}/{}/{}",
            self.family,
            self.point_size,
            self.weight,
            u8::from(self.italic),
            r,
            g,
            b,
            a,
            self.underline as u8,
            u8::from(self.strikethrough),
            self.vertical_align as u8,
            self.language.as_deref().unwrap_or_default(),
            u8::from(self.hyphenation),
        );
        key
    }
}

impl PartialEq for TextFormat {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_distinguishes_decorations() {
        let plain = TextFormat::default();
        let underlined = TextFormat {
            underline: UnderlineStyle::Single,
            ..TextFormat::default()
        };
        assert_ne!(plain.key(), underlined.key());
        assert_eq!(plain, TextFormat::default(), "equality is by key");
    }

    #[test]
    fn key_includes_color() {
        let red = TextFormat {
            color: Color::from_rgba8(255, 0, 0, 255),
            ..TextFormat::default()
        };
        assert!(red.key().contains("ff0000ff"), "key was {}", red.key());
    }
}
