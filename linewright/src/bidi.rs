// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional level resolution and visual reordering.

use alloc::vec;
use alloc::vec::Vec;
use unicode_bidi::{BidiClass, BidiInfo, Level};

use crate::layout::Direction;

/// Resolved embedding levels for one paragraph.
pub(crate) struct BidiLevels {
    /// Whether the paragraph's base direction is right-to-left.
    pub(crate) rtl: bool,
    /// One embedding level per `char` of the analyzed text.
    pub(crate) levels: Vec<u8>,
}

/// Resolves embedding levels for `text`, one per `char`.
pub(crate) fn resolve(text: &str, direction: Direction) -> BidiLevels {
    let char_count = text.chars().count();
    let needs_resolution = direction == Direction::RightToLeft
        || text.chars().any(|c| {
            matches!(
                unicode_bidi::bidi_class(c),
                BidiClass::R
                    | BidiClass::AL
                    | BidiClass::AN
                    | BidiClass::RLE
                    | BidiClass::RLO
                    | BidiClass::RLI
            )
        });
    if !needs_resolution {
        return BidiLevels {
            rtl: false,
            levels: vec![0; char_count],
        };
    }

    let default_level = match direction {
        Direction::Auto => None,
        Direction::LeftToRight => Some(Level::ltr()),
        Direction::RightToLeft => Some(Level::rtl()),
    };
    let info = BidiInfo::new(text, default_level);
    let rtl = info
        .paragraphs
        .first()
        .map(|para| para.level.is_rtl())
        .unwrap_or(direction == Direction::RightToLeft);
    let levels = text
        .char_indices()
        .map(|(byte_pos, _)| info.levels[byte_pos].number())
        .collect();
    BidiLevels { rtl, levels }
}

/// Returns the indices of `levels` in visual order.
pub(crate) fn visual_order(levels: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();

    // Find the max level and the min *odd* level
    let mut max_level = 0;
    let mut lowest_odd_level = 255;
    for &level in levels {
        if level > max_level {
            max_level = level;
        }
        if level & 1 != 0 && level < lowest_odd_level {
            lowest_odd_level = level;
        }
    }

    for level in (lowest_odd_level..=max_level).rev() {
        let mut i = 0;
        while i < order.len() {
            if levels[order[i]] >= level {
                let mut end = i + 1;
                while end < order.len() && levels[order[end]] >= level {
                    end += 1;
                }
                order[i..end].reverse();
                i = end;
            }
            i += 1;
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_is_all_ltr() {
        let resolved = resolve("abc def", Direction::Auto);
        assert!(!resolved.rtl);
        assert_eq!(resolved.levels, [0; 7]);
    }

    #[test]
    fn hebrew_run_is_odd() {
        let resolved = resolve("ab \u{5d0}\u{5d1}", Direction::Auto);
        assert!(!resolved.rtl, "first strong character is latin");
        assert_eq!(resolved.levels[3] & 1, 1);
        assert_eq!(resolved.levels[4] & 1, 1);
        assert_eq!(resolved.levels[0], 0);
    }

    #[test]
    fn forced_rtl_paragraph() {
        let resolved = resolve("abc", Direction::RightToLeft);
        assert!(resolved.rtl);
    }

    #[test]
    fn reorders_rtl_run() {
        assert_eq!(visual_order(&[0, 0, 1, 1, 1, 0]), [0, 1, 4, 3, 2, 5]);
        assert_eq!(visual_order(&[0, 0, 0]), [0, 1, 2], "ltr stays in logical order");
    }
}
