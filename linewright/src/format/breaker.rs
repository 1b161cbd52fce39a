// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking in layout units.

use alloc::string::String;
use alloc::vec::Vec;

use super::tabs::{self, ResolvedTabs};
use super::{align, spacing, FormatContext, FormatOutcome, Formatter};
use crate::counter::CounterAlignment;
use crate::flow::{Flow, MarginAdjustment};
use crate::layout::{Alignment, ParagraphLayout};
use crate::paragraph::LineRecord;
use crate::text::{CharFlags, CharacterRun, SOFT_HYPHEN};

/// Vertical extent of a character or line: baseline offset and total height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct Extent {
    pub(super) baseline: i32,
    pub(super) height: i32,
}

impl Extent {
    /// The smallest extent holding both `self` and `other` on one baseline.
    fn combine(self, other: Self) -> Self {
        let below = (self.height - self.baseline).max(other.height - other.baseline);
        let baseline = self.baseline.max(other.baseline);
        Self {
            baseline,
            height: baseline + below,
        }
    }
}

/// Line extent remembered after each character of the current word, so that
/// a hyphenation break can restore it.
#[derive(Clone, Copy, Debug)]
struct WordState {
    index: usize,
    extent: Extent,
}

/// What to do with the current character after a break.
enum Step {
    /// Place the character, with the given width, on the current line.
    Place(i32),
    /// Continue with the character at this index, re-measuring it.
    Resume(usize),
}

pub(super) struct LineBreaker<'a> {
    formatter: &'a Formatter<'a>,
    run: &'a mut CharacterRun,
    layout: &'a ParagraphLayout,
    context: &'a FormatContext,
    flow: &'a dyn Flow,

    rtl: bool,
    alignment: Alignment,
    tabs: ResolvedTabs,
    max_y: Option<i32>,

    lines: Vec<LineRecord>,
    line: LineRecord,
    /// Extent of the current line up to the last break opportunity.
    extent: Extent,
    /// Extent of the current line including the pending word.
    pending: Extent,
    x: i32,
    y: i32,
    available: i32,
    page_width: i32,
    left: i32,
    right: i32,
    line_height_hint: i32,
    first_char: usize,
    last_break: Option<usize>,
    word: Vec<WordState>,
    width_used: i32,
    force_break: bool,
    abort: bool,
    full_width: bool,
    /// Best position seen while searching down for room: `(y, available)`.
    best_empty_line: Option<(i32, i32)>,
    empty_line_moves: u32,
}

impl<'a> LineBreaker<'a> {
    pub(super) fn new(
        formatter: &'a Formatter<'a>,
        run: &'a mut CharacterRun,
        layout: &'a ParagraphLayout,
        context: &'a FormatContext,
        flow: &'a dyn Flow,
    ) -> Self {
        run.reset_layout();
        let rtl = run.is_right_to_left();
        Self {
            formatter,
            rtl,
            alignment: layout.alignment.resolve(rtl),
            tabs: tabs::resolve_tabs(formatter, &layout.tabs),
            max_y: flow.available_height(),
            run,
            layout,
            context,
            flow,
            lines: Vec::new(),
            line: LineRecord::default(),
            extent: Extent::default(),
            pending: Extent::default(),
            x: 0,
            y: 0,
            available: 0,
            page_width: 0,
            left: 0,
            right: 0,
            line_height_hint: 0,
            first_char: 0,
            last_break: None,
            word: Vec::new(),
            width_used: 0,
            force_break: false,
            abort: false,
            full_width: true,
            best_empty_line: None,
            empty_line_moves: 0,
        }
    }

    pub(super) fn run(mut self) -> FormatOutcome {
        let len = self.run.len();
        let settings = self.formatter.settings;

        self.y = self.initial_y();
        let first_width = self.measure(0);
        let first_extent = self.formatter.vertical(&self.run.chars()[0]);
        self.line_height_hint = first_extent.height;
        self.query_margins(first_extent.height, first_width, true);
        self.start_line(0);

        let mut i = 0;
        while i < len {
            let ww = self.measure(i);
            if self.abort {
                self.place(i, ww);
                i += 1;
                continue;
            }
            if self.is_own_line_item(i) {
                self.own_line_item(i);
                i += 1;
                continue;
            }

            let ch = self.run.chars()[i].ch();
            let after_newline = i > 0
                && settings.newlines_allowed
                && self.run.chars()[i - 1].ch() == '\n'
                && self.last_break.is_some();
            let overflow = self.x + ww > self.available
                && (self.last_break.is_some() || settings.allow_break_in_words)
                && (!self.run.is_breakable(i)
                    || (i > 1
                        && self.last_break == Some(i - 1)
                        && self.run.is_breakable(i - 2)))
                && i < len - 1;
            let forced = self.force_break && i < len - 1;

            let mut ww = ww;
            if overflow || after_newline || forced {
                match self.break_line(i, ww, overflow && !forced && !after_newline) {
                    Step::Resume(next) => {
                        i = next;
                        continue;
                    }
                    Step::Place(width) => ww = width,
                }
            } else if self.run.is_breakable(i) || (settings.newlines_allowed && ch == '\n') {
                if let Some(restart) = self.break_opportunity(i) {
                    i = restart;
                    continue;
                }
            } else if i < len - 1 {
                let c = &self.run.chars()[i];
                self.pending = self.pending.combine(self.formatter.vertical(c));
                self.word.push(WordState {
                    index: i,
                    extent: self.pending,
                });
            }
            self.place(i, ww);
            i += 1;
        }

        self.finish_paragraph()
    }

    /// Top of the first line, relative to the paragraph.
    ///
    /// The first paragraph of a document gets no top margin. Elsewhere the
    /// margin may be cut short by the flow, e.g. at the top of a page; the
    /// border is always kept.
    fn initial_y(&self) -> i32 {
        let (breakable, full) = self.formatter.top_margins(self.layout, self.context);
        let mut y = 0;
        if self.context.has_previous && breakable > 0 {
            let shift = self.flow.adjust_flow(self.context.y, 0, breakable);
            y = if shift > 0 { shift } else { breakable };
        }
        y + full - breakable
    }

    fn base_margin(&self, pt: f64) -> i32 {
        self.formatter.lu(pt)
    }

    /// Width reserved for the label on the leading side of the first line.
    ///
    /// A label aligned to the trailing side takes no room from the text.
    fn counter_width(&self) -> i32 {
        let Some(counter) = &self.layout.counter else {
            return 0;
        };
        let leading = match counter.alignment() {
            CounterAlignment::Auto => true,
            CounterAlignment::Left => !self.rtl,
            CounterAlignment::Right => self.rtl,
        };
        if leading {
            self.context.counter_width
        } else {
            0
        }
    }

    fn left_margin(&self, first_line: bool) -> i32 {
        let m = &self.layout.margins;
        let mut left = self.base_margin(m.left + self.layout.left_border.space());
        if first_line && !self.rtl {
            left += self.base_margin(m.first_line) + self.counter_width();
        }
        left
    }

    fn right_margin(&self, first_line: bool) -> i32 {
        let m = &self.layout.margins;
        let mut right = self.base_margin(m.right + self.layout.right_border.space());
        if first_line && self.rtl {
            right += self.base_margin(m.first_line) + self.counter_width();
        }
        right
    }

    /// Asks the flow for the margins of a line at the current y and moves
    /// `x` to the start of that line.
    fn query_margins(&mut self, height: i32, min_width: i32, first_line: bool) {
        let left = self.left_margin(first_line);
        let right = self.right_margin(first_line);
        let adjusted =
            self.flow
                .adjust_margins(self.context.y + self.y, height, min_width, left, right);
        self.apply_margins(adjusted, left, right);
    }

    fn apply_margins(&mut self, adjusted: MarginAdjustment, left: i32, right: i32) {
        if adjusted.left != left
            || adjusted.right != right
            || adjusted.page_width != self.flow.width()
        {
            self.full_width = false;
        }
        self.x = adjusted.left;
        self.left = adjusted.left;
        self.right = adjusted.right;
        self.page_width = adjusted.page_width;
        self.available = adjusted.page_width - adjusted.right;
        if self.available < self.x {
            log::warn!(
                "no room for text at y={}: left={} available={}",
                self.context.y + self.y,
                self.x,
                self.available
            );
        }
    }

    /// Width of the character at `index` at the current x, stored in the run.
    fn measure(&mut self, index: usize) -> i32 {
        let c = &self.run.chars()[index];
        let width = if c.ch() == '\t' && !c.is_custom() {
            let next = tabs::next_tab(
                self.formatter,
                self.run,
                index,
                self.x,
                self.available,
                &self.tabs,
                self.rtl,
            );
            if next < self.x {
                (self.available - self.x).max(0)
            } else {
                next - self.x
            }
        } else {
            self.formatter.advance(c)
        };
        self.run.chars_mut()[index].width = width;
        width
    }

    fn place(&mut self, index: usize, width: i32) {
        self.run.chars_mut()[index].x = self.x;
        self.x += width;
    }

    fn start_line(&mut self, index: usize) {
        let extent = self.formatter.vertical(&self.run.chars()[index]);
        self.line = LineRecord {
            start: index,
            y: self.y,
            width: self.page_width,
            ..LineRecord::default()
        };
        self.extent = extent;
        self.pending = extent;
        self.first_char = index;
        self.last_break = None;
        self.word.clear();
        self.empty_line_moves = 0;
        self.best_empty_line = None;
        self.run.chars_mut()[index].flags.insert(CharFlags::LINE_START);
    }

    /// Completes the current line with `last` as its last character and
    /// `space` left over for alignment.
    fn finish_line(&mut self, last: usize, alignment: Alignment, space: i32) {
        let start = self.first_char;
        let len = self.run.len();
        // Measured before alignment moves the line; the anchor is invisible.
        let line_used = self.run.chars()[start..(last + 1).min(len - 1).max(start)]
            .iter()
            .map(|c| c.x() + c.width())
            .max()
            .unwrap_or(0);
        self.width_used = self.width_used.max(line_used);
        // The anchor keeps its place at the end and only counts on a line of
        // its own.
        let end = if last + 1 == len && last > start {
            last - 1
        } else {
            last
        };
        align::resolve_line(self.run, start, last, alignment, space);
        align::smooth_underlines(self.run, start, last);
        align::reorder_line(self.run, start, end);

        let font_height = self.run.chars()[start..=end]
            .iter()
            .map(|c| self.formatter.font_height(c))
            .max()
            .unwrap_or(0);
        let line_spacing = spacing::line_spacing(
            self.layout.line_spacing,
            self.extent.height,
            font_height,
            self.formatter.zoom,
        );

        self.line.baseline = self.extent.baseline;
        self.line.line_spacing = line_spacing;
        self.line.height = self.extent.height + line_spacing;
        self.line.width = self.page_width;
        self.y += self.line.height;
        self.lines.push(self.line);
    }

    /// Starts a new line at `index` below the finished one.
    fn new_line(&mut self, index: usize, min_width: i32) {
        let extent = self.formatter.vertical(&self.run.chars()[index]);
        self.line_height_hint = extent.height;
        self.query_margins(extent.height, min_width, false);
        self.start_line(index);
    }

    /// Handles a character that does not fit, or that follows a forced break.
    fn break_line(&mut self, i: usize, ww: i32, try_hyphenation: bool) -> Step {
        let hyphenated = try_hyphenation
            && !self.run.chars()[i].is_custom()
            && self.hyphenate(i);

        if let Some(b) = self.last_break {
            if self
                .max_y
                .is_some_and(|max_y| self.context.y + self.y + self.extent.height >= max_y)
            {
                log::debug!("line at y={} is past the end of the flow", self.context.y + self.y);
                self.abort = true;
                return Step::Place(ww);
            }
            let breaking = &self.run.chars()[b];
            let mut space = self.available - breaking.x() - breaking.width();
            if breaking.ch() == SOFT_HYPHEN || hyphenated {
                let hyphen = self.formatter.hyphen_width(breaking);
                if breaking.ch() == SOFT_HYPHEN {
                    self.run.chars_mut()[b].width = hyphen;
                }
                space -= hyphen;
            }
            self.line.hyphenated = hyphenated;
            self.finish_line(b, self.alignment, space);
            let next = b + 1;
            let min_width = self.formatter.advance(&self.run.chars()[next]);
            self.new_line(next, min_width);
            return Step::Resume(next);
        }

        let empty_line = self.first_char == i;
        if empty_line {
            return self.search_room_below(i, ww);
        }

        self.finish_line(i - 1, self.alignment, self.available - self.x);
        self.force_break = false;
        self.new_line(i, ww);
        if self
            .max_y
            .is_some_and(|max_y| self.context.y + self.y >= max_y)
        {
            log::debug!("no room left after y={}", self.context.y + self.y);
            self.abort = true;
            return Step::Place(self.measure(i));
        }
        Step::Resume(i)
    }

    /// Moves an empty line down until its first character fits.
    ///
    /// At the end of the flow a character wider than the whole flow goes back
    /// to where the line was widest and overflows there, since no page would
    /// be wide enough. A narrower character in a bounded flow aborts the
    /// paragraph so the host can add room.
    fn search_room_below(&mut self, i: usize, ww: i32) -> Step {
        let (best_y, best_available) = self.best_empty_line.unwrap_or((self.y, i32::MIN));
        if self.available > best_available {
            self.best_empty_line = Some((self.y, self.available));
        } else {
            self.best_empty_line = Some((best_y, best_available));
        }

        let past_end = self
            .max_y
            .is_some_and(|max_y| self.context.y + self.y >= max_y);
        let out_of_moves = self.max_y.is_none()
            && self.empty_line_moves >= self.formatter.settings.max_empty_line_moves;
        let height = self.pending.height;
        if !(past_end || out_of_moves || height <= 0) {
            self.y += height;
            self.empty_line_moves += 1;
            self.line.y = self.y;
            let first_line = self.first_char == 0;
            self.query_margins(self.line_height_hint, ww, first_line);
            log::debug!(
                "moving empty line down by {height} to y={}",
                self.context.y + self.y
            );
            return Step::Resume(i);
        }

        if past_end && ww < self.flow.width() {
            log::debug!(
                "character {i} of width {ww} fits nowhere before the end of the flow"
            );
            self.abort = true;
            return Step::Place(ww);
        }

        if let Some((y, _)) = self.best_empty_line.take() {
            log::debug!("placing overflowing character {i} at y={}", self.context.y + y);
            self.y = y;
            self.line.y = y;
            let first_line = self.first_char == 0;
            self.query_margins(self.line_height_hint, ww, first_line);
        }
        Step::Place(self.measure(i))
    }

    /// Looks for a hyphenation point in the word being broken; on success
    /// `last_break` points at the character after which the hyphen goes.
    fn hyphenate(&mut self, i: usize) -> bool {
        let Some(hyphenator) = self.formatter.hyphenator else {
            return false;
        };
        let chars = self.run.chars();
        let mut word_start = match self.last_break {
            Some(b) => b + 1,
            None => self.first_char,
        };
        while word_start > 0 && !self.run.is_breakable(word_start - 1) {
            word_start -= 1;
        }
        if word_start >= i {
            return false;
        }
        let mut word_end = i;
        while word_end < chars.len() - 1 && !self.run.is_breakable(word_end) {
            word_end += 1;
        }
        if chars[word_start..word_end].iter().any(|c| c.is_custom()) {
            return false;
        }
        let word: String = chars[word_start..word_end].iter().map(|c| c.ch()).collect();
        if word.chars().count() < 2 {
            return false;
        }
        let language = chars[word_start].format().language.as_deref().unwrap_or("");
        let points = match hyphenator.hyphenate(&word, language) {
            Ok(points) => points,
            Err(err) => {
                log::debug!("not hyphenating `{word}`: {err}");
                return false;
            }
        };

        // Never break before the first character of this line.
        let min_pos = self.first_char.saturating_sub(word_start);
        let max_len = i - word_start;
        for pos in (min_pos..max_len).rev() {
            let index = word_start + pos;
            if points.can_break_after(pos) && chars[index].format().hyphenation {
                self.last_break = Some(index);
                if let Some(state) = self.word.iter().find(|state| state.index == index) {
                    self.extent = state.extent;
                }
                log::debug!("hyphenating `{word}` after character {pos}");
                return true;
            }
        }
        false
    }

    /// Records a break opportunity at `i`.
    ///
    /// Returns the index to restart the line from when its grown height
    /// changes the margins the flow gives it.
    fn break_opportunity(&mut self, i: usize) -> Option<usize> {
        let len = self.run.len();
        if i + 1 < len {
            let c = &self.run.chars()[i];
            self.pending = self.pending.combine(self.formatter.vertical(c));
        }
        self.word.clear();
        self.extent = self.extent.combine(self.pending);

        if self.extent.height > self.line_height_hint {
            self.line_height_hint = self.extent.height;
            let first_line = self.first_char == 0;
            let left = self.left_margin(first_line);
            let right = self.right_margin(first_line);
            let first_width = self.run.chars()[self.first_char].width();
            let adjusted = self.flow.adjust_margins(
                self.context.y + self.y,
                self.line_height_hint,
                first_width,
                left,
                right,
            );
            if adjusted.left != self.left
                || adjusted.right != self.right
                || adjusted.page_width != self.page_width
            {
                log::debug!(
                    "line at y={} grew to {}, formatting it again",
                    self.context.y + self.y,
                    self.extent.height
                );
                self.apply_margins(adjusted, left, right);
                let start = self.first_char;
                let extent = self.formatter.vertical(&self.run.chars()[start]);
                self.extent = extent;
                self.pending = extent;
                self.last_break = None;
                return Some(start);
            }
        }

        let c = self.run.chars()[i].ch();
        if i + 2 < len || c != ' ' {
            self.last_break = Some(i);
        }
        None
    }

    fn is_own_line_item(&self, index: usize) -> bool {
        self.run.chars()[index]
            .custom_item()
            .is_some_and(|item| item.own_line && !item.is_floating())
    }

    /// Puts the custom item at `index` on a line of its own, stretched to the
    /// available width.
    fn own_line_item(&mut self, index: usize) {
        if self.first_char != index {
            self.finish_line(index - 1, self.alignment, self.available - self.x);
            self.new_line(index, 0);
        }
        let width = (self.available - self.x).max(0);
        let c = &mut self.run.chars_mut()[index];
        if let Some(item) = c.custom.as_mut() {
            item.width = width;
        }
        c.width = width;
        let extent = self.formatter.vertical(c);
        self.extent = extent;
        self.pending = extent;
        self.place(index, width);
        self.last_break = None;
        self.force_break = true;
    }

    fn finish_paragraph(mut self) -> FormatOutcome {
        let len = self.run.len();
        let last = len - 1;
        self.extent = self.extent.combine(self.pending);
        // The last line of a justified paragraph is aligned to the start.
        let alignment = if self.alignment == Alignment::Justified {
            Alignment::Start.resolve(self.rtl)
        } else {
            self.alignment
        };
        // The anchor's width does not count, so centering is not skewed.
        let space = self.available - self.x + self.run.chars()[last].width();
        self.finish_line(last, alignment, space);
        self.force_break = false;

        let height = self.y + self.formatter.bottom_margin(self.layout, self.context);
        FormatOutcome {
            lines: self.lines,
            height,
            width_used: self.width_used,
            complete: !self.abort,
            full_width: self.full_width,
        }
    }
}
