// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::bidi;
use crate::layout::Alignment;
use crate::text::{CharacterRun, TextChar};

/// Distributes `space` over the characters `start..=last` of one line.
///
/// Center and right alignment shift the whole line. Justification widens the
/// stretchable characters after the last tab of the line; `last` itself is
/// never widened. `alignment` must already be resolved against the paragraph
/// direction; [`Alignment::Start`] is treated as left.
pub(crate) fn resolve_line(
    run: &mut CharacterRun,
    start: usize,
    last: usize,
    alignment: Alignment,
    space: i32,
) {
    let space = space.max(0);
    let chars = &mut run.chars_mut()[start..=last];
    match alignment {
        Alignment::Center | Alignment::Right => {
            let shift = if alignment == Alignment::Center {
                space / 2
            } else {
                space
            };
            for c in chars {
                c.x += shift;
            }
        }
        Alignment::Justified => justify(chars, space),
        Alignment::Start | Alignment::Left => {}
    }
}

fn justify(chars: &mut [TextChar], mut space: i32) {
    let Some(last) = chars.len().checked_sub(1) else {
        return;
    };
    let mut from = 0;
    let mut gaps = 0;
    for (j, c) in chars[..last].iter().enumerate().rev() {
        if c.ch() == '\t' {
            from = j + 1;
            break;
        }
        if c.is_stretchable() {
            gaps += 1;
        }
    }

    let mut to_add = 0;
    for (k, c) in chars.iter_mut().enumerate().skip(from) {
        c.x += to_add;
        if k < last && gaps > 0 && c.is_stretchable() {
            let share = space / gaps;
            to_add += share;
            space -= share;
            gaps -= 1;
            c.width += share;
        }
    }
}

/// Gives each run of underlined characters on a line the same stroke width:
/// the average point size of the run divided by 18.
pub(super) fn smooth_underlines(run: &mut CharacterRun, start: usize, last: usize) {
    let chars = &mut run.chars_mut()[start..=last];
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].format.underline.is_underlined() {
            chars[i].underline_width = 0.;
            i += 1;
            continue;
        }
        let mut end = i;
        let mut total = 0.;
        while end < chars.len() && chars[end].format.underline.is_underlined() {
            total += chars[end].format.point_size;
            end += 1;
        }
        let width = total / (end - i) as f64 / 18.;
        for c in &mut chars[i..end] {
            c.underline_width = width;
        }
        i = end;
    }
}

/// Reassigns x positions of `start..=last` in visual order when the line
/// holds right-to-left text.
pub(super) fn reorder_line(run: &mut CharacterRun, start: usize, last: usize) {
    let chars = &mut run.chars_mut()[start..=last];
    if chars.iter().all(|c| c.bidi_level() == 0) {
        return;
    }
    let levels: Vec<u8> = chars.iter().map(TextChar::bidi_level).collect();
    let mut x = chars.iter().map(TextChar::x).min().unwrap_or(0);
    for index in bidi::visual_order(&levels) {
        chars[index].x = x;
        x += chars[index].width;
    }
}
