// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab stop resolution.

use smallvec::SmallVec;

use super::Formatter;
use crate::layout::{TabStop, TabType};
use crate::text::CharacterRun;

/// Tab stops converted to layout units, in position order.
pub(super) type ResolvedTabs = SmallVec<[(i32, TabStop); 4]>;

pub(super) fn resolve_tabs(formatter: &Formatter<'_>, stops: &[TabStop]) -> ResolvedTabs {
    stops
        .iter()
        .map(|stop| (formatter.lu(stop.position), *stop))
        .collect()
}

/// Returns the x at which the text after the tab at `index` starts.
///
/// The result may be less than `x` when no stop fits; callers then extend the
/// tab to the end of the line.
pub(super) fn next_tab(
    formatter: &Formatter<'_>,
    run: &CharacterRun,
    index: usize,
    x: i32,
    available: i32,
    tabs: &ResolvedTabs,
    rtl: bool,
) -> i32 {
    let ordered: &mut dyn Iterator<Item = &(i32, TabStop)> = if rtl {
        &mut tabs.iter().rev()
    } else {
        &mut tabs.iter()
    };
    for &(position, stop) in ordered {
        // Stops past the right edge act as if they were on it.
        let mut tab = position.min(available);
        if rtl {
            tab = available - tab;
        }
        if tab <= x {
            continue;
        }
        let kind = match (stop.kind, rtl) {
            (TabType::Left, true) => TabType::Right,
            (TabType::Right, true) => TabType::Left,
            (kind, _) => kind,
        };
        return match kind {
            TabType::Left => tab,
            TabType::Right => tab - segment_width(formatter, run, index, None, rtl),
            TabType::Center => tab - segment_width(formatter, run, index, None, rtl) / 2,
            TabType::DecimalPoint => {
                tab - segment_width(formatter, run, index, Some(stop.align_char), rtl)
            }
        };
    }

    let width = formatter.lu(formatter.settings.default_tab_width);
    if width > 0 {
        width * (x / width + 1)
    } else {
        x
    }
}

/// Width of the text between the tab at `index` and the next tab or newline.
///
/// With `align_char`, measuring stops at the middle of that character. Text
/// without it is aligned as if on a right stop.
fn segment_width(
    formatter: &Formatter<'_>,
    run: &CharacterRun,
    index: usize,
    align_char: Option<char>,
    rtl: bool,
) -> i32 {
    let chars = run.chars();
    let end = chars.len() - 1;
    let mut width = 0;
    for c in chars.iter().take(end).skip(index + 1) {
        if matches!(c.ch(), '\t' | '\n') {
            break;
        }
        let advance = formatter.advance(c);
        if align_char == Some(c.ch()) && !c.is_custom() {
            if rtl {
                // The last decimal character counts in right-to-left text.
                width = advance / 2;
                continue;
            }
            width += advance / 2;
            break;
        }
        width += advance;
    }
    width
}
