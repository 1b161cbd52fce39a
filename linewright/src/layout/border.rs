// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::util::color_key;

/// Line style of a paragraph border.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BorderStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Dashed line.
    Dash,
    /// Dotted line.
    Dot,
    /// Alternating dashes and dots.
    DashDot,
    /// A dash followed by two dots.
    DashDotDot,
    /// Two parallel lines.
    Double,
}

/// One side of a paragraph border.
///
/// A border with zero width is not drawn and takes no space.
#[derive(Copy, Clone, Debug)]
pub struct Border {
    /// Line width in points.
    pub width: f64,
    /// Line style.
    pub style: BorderStyle,
    /// Line color.
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            width: 0.,
            style: BorderStyle::Solid,
            color: Color::BLACK,
        }
    }
}

impl Border {
    /// A solid border of `width` points.
    pub fn solid(width: f64, color: Color) -> Self {
        Self {
            width,
            style: BorderStyle::Solid,
            color,
        }
    }

    /// Space taken by this border, in points.
    ///
    /// A double border is drawn as two lines with a gap, so it takes three
    /// times its line width.
    pub fn space(&self) -> f64 {
        match self.style {
            _ if self.width <= 0. => 0.,
            BorderStyle::Double => self.width * 3.,
            _ => self.width,
        }
    }
}

impl PartialEq for Border {
    fn eq(&self, other: &Self) -> bool {
        self.width.to_bits() == other.width.to_bits()
            && self.style == other.style
            && color_key(self.color) == color_key(other.color)
    }
}
