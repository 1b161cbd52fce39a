// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::layout::LineSpacing;
use crate::units::ZoomHandler;
use crate::util::round_to_i32;

/// Extra space below a line, in layout units.
///
/// `line_height` is the height of the line box; `font_height` the height of
/// the tallest format on the line, which proportional modes scale. The result
/// is negative when a fixed height is smaller than the line box.
pub(super) fn line_spacing(
    spacing: LineSpacing,
    line_height: i32,
    font_height: i32,
    zoom: &ZoomHandler,
) -> i32 {
    match spacing {
        LineSpacing::Single => 0,
        LineSpacing::Custom(pt) => zoom.pt_to_layout_unit(pt),
        LineSpacing::Multiple(factor) => round_to_i32((factor - 1.) * f64::from(font_height)),
        LineSpacing::OneAndHalf => font_height / 2,
        LineSpacing::Double => font_height,
        LineSpacing::AtLeast(pt) => line_height.max(zoom.pt_to_layout_unit(pt)) - line_height,
        LineSpacing::Fixed(pt) => zoom.pt_to_layout_unit(pt) - line_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes() {
        let zoom = ZoomHandler::default();
        let s = |mode| line_spacing(mode, 300, 240, &zoom);
        assert_eq!(s(LineSpacing::Single), 0);
        assert_eq!(s(LineSpacing::Custom(2.)), 40);
        assert_eq!(s(LineSpacing::Multiple(1.25)), 60);
        assert_eq!(s(LineSpacing::Multiple(0.5)), -120, "factors below one shrink");
        assert_eq!(s(LineSpacing::OneAndHalf), 120);
        assert_eq!(s(LineSpacing::Double), 240);
        assert_eq!(s(LineSpacing::AtLeast(10.)), 0, "line is taller already");
        assert_eq!(s(LineSpacing::AtLeast(20.)), 100);
        assert_eq!(s(LineSpacing::Fixed(12.)), -60);
    }
}
