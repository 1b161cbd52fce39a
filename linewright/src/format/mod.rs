// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking, alignment and vertical placement of paragraphs.
//!
//! All positions are integers in layout units so that line breaks do not
//! depend on the zoom level. The formatter never fails: when it cannot place
//! a line it reports [`FormatOutcome::complete`] as `false` and leaves it to
//! the host to make room (for example by adding a page) and format again.

mod align;
mod breaker;
mod spacing;
mod tabs;


use alloc::vec::Vec;
use core::fmt;

use crate::flow::Flow;
use crate::hyphen::Hyphenator;
use crate::layout::ParagraphLayout;
use crate::metrics::FontMetrics;
use crate::paragraph::LineRecord;
use crate::text::{CharacterRun, SOFT_HYPHEN, TextChar};
use crate::units::ZoomHandler;

/// Tunable behavior of the formatter.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatterSettings {
    /// Break inside a word that does not fit on a line of its own.
    pub allow_break_in_words: bool,
    /// Treat `\n` as a forced line break.
    pub newlines_allowed: bool,
    /// Distance between default tab stops, in points.
    pub default_tab_width: f64,
    /// Ask the flow to move lines past page boundaries after formatting.
    pub page_breaking: bool,
    /// How many times a line that fits nowhere is moved down before giving
    /// up, when the flow has no height limit.
    pub max_empty_line_moves: u32,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            allow_break_in_words: true,
            newlines_allowed: true,
            default_tab_width: 36.,
            page_breaking: false,
            max_empty_line_moves: 64,
        }
    }
}

/// Where a paragraph sits relative to its neighbors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatContext {
    /// Document y of the top of the paragraph, in layout units.
    pub y: i32,
    /// Whether another paragraph precedes this one.
    pub has_previous: bool,
    /// Whether the top border merges into the previous paragraph's.
    pub join_previous: bool,
    /// Whether the bottom border merges into the next paragraph's.
    pub join_next: bool,
    /// Width of the counter label, in layout units.
    pub counter_width: i32,
    /// Whether the paragraph must start on a new page.
    pub break_before: bool,
}

/// Result of formatting one paragraph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatOutcome {
    /// The lines, in order. Never empty.
    pub lines: Vec<LineRecord>,
    /// Height of the paragraph including its margins.
    pub height: i32,
    /// Largest x reached by a visible character.
    pub width_used: i32,
    /// `false` when formatting stopped because no room was left.
    pub complete: bool,
    /// Whether every line got the full width of the flow.
    pub full_width: bool,
}

/// Breaks paragraphs into lines.
///
/// A formatter borrows the collaborators it needs for one or more passes: font
/// metrics, the zoom handler for unit conversion and, optionally, a
/// hyphenator.
#[derive(Clone, Copy)]
pub struct Formatter<'a> {
    metrics: &'a dyn FontMetrics,
    zoom: &'a ZoomHandler,
    hyphenator: Option<&'a dyn Hyphenator>,
    settings: &'a FormatterSettings,
}

impl fmt::Debug for Formatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("zoom", self.zoom)
            .field("hyphenator", &self.hyphenator.is_some())
            .field("settings", self.settings)
            .finish_non_exhaustive()
    }
}

impl<'a> Formatter<'a> {
    /// Creates a formatter without hyphenation.
    pub fn new(
        metrics: &'a dyn FontMetrics,
        zoom: &'a ZoomHandler,
        settings: &'a FormatterSettings,
    ) -> Self {
        Self {
            metrics,
            zoom,
            hyphenator: None,
            settings,
        }
    }

    /// Uses `hyphenator` to split words that do not fit.
    #[must_use]
    pub fn with_hyphenator(mut self, hyphenator: &'a dyn Hyphenator) -> Self {
        self.hyphenator = Some(hyphenator);
        self
    }

    /// The settings in effect.
    pub fn settings(&self) -> &FormatterSettings {
        self.settings
    }

    /// Breaks `run` into lines and assigns every character its x position and
    /// width.
    pub fn format(
        &self,
        run: &mut CharacterRun,
        layout: &ParagraphLayout,
        context: &FormatContext,
        flow: &dyn Flow,
    ) -> FormatOutcome {
        log::trace!(
            "formatting {} characters at y={}",
            run.len(),
            context.y
        );
        breaker::LineBreaker::new(self, run, layout, context, flow).run()
    }

    /// Places formatted `lines` against page boundaries, returning the new
    /// paragraph height and whether any line was moved down.
    ///
    /// With `keep_together`, the paragraph moves as a whole.
    pub fn format_vertically(
        &self,
        lines: &mut [LineRecord],
        layout: &ParagraphLayout,
        context: &FormatContext,
        flow: &dyn Flow,
        keep_together: bool,
    ) -> (i32, bool) {
        let mut moved_down = false;
        let Some(first) = lines.first() else {
            return (0, false);
        };
        let mut h = first.y;
        if context.break_before {
            let shift = flow.page_break(context.y + h);
            if shift != 0 {
                log::debug!("page break before y={}", context.y + h);
                moved_down = true;
                h += shift;
            }
        }
        if keep_together && lines.len() > 1 {
            let total: i32 = lines.iter().map(|line| line.height).sum();
            let shift = flow.adjust_flow(context.y + h, first.width, total);
            if shift != 0 {
                log::debug!("paragraph at y={} moved down by {shift}", context.y + h);
                moved_down = true;
            }
            h += shift;
            for line in lines.iter_mut() {
                line.y = h;
                h += line.height;
            }
        } else {
            for line in lines.iter_mut() {
                line.y = h;
                let shift = flow.adjust_flow(context.y + line.y, line.width, line.height);
                if shift != 0 {
                    log::debug!("line at y={} moved down by {shift}", context.y + line.y);
                    moved_down = true;
                }
                line.y += shift;
                h = line.y + line.height;
            }
        }
        (h + self.bottom_margin(layout, context), moved_down)
    }

    fn lu(&self, pt: f64) -> i32 {
        self.zoom.pt_to_layout_unit(pt)
    }

    /// Advance of `c` in layout units, ignoring tabs.
    fn advance(&self, c: &TextChar) -> i32 {
        match c.custom_item() {
            Some(item) if item.is_floating() => 0,
            Some(item) => item.width.max(0),
            None if c.ch() == SOFT_HYPHEN => 0,
            None => self.lu(self.metrics.advance(c.format(), c.ch())),
        }
    }

    /// Width of the hyphen drawn when a line breaks after `c`.
    fn hyphen_width(&self, c: &TextChar) -> i32 {
        self.lu(self.metrics.advance(c.format(), '-'))
    }

    /// Ascent and height of `c` in layout units.
    fn vertical(&self, c: &TextChar) -> breaker::Extent {
        match c.custom_item() {
            Some(item) if item.is_floating() => breaker::Extent::default(),
            Some(item) => breaker::Extent {
                baseline: item.ascent,
                height: item.height,
            },
            None => {
                let vm = self.metrics.vertical(c.format());
                let baseline = self.lu(vm.ascent);
                breaker::Extent {
                    baseline,
                    height: baseline + self.lu(vm.descent),
                }
            }
        }
    }

    /// Height of the tallest format on a line, as used by proportional line spacing.
    fn font_height(&self, c: &TextChar) -> i32 {
        if c.is_custom() {
            0
        } else {
            self.lu(self.metrics.vertical(c.format()).height())
        }
    }

    fn top_margins(&self, layout: &ParagraphLayout, context: &FormatContext) -> (i32, i32) {
        let breakable = self.lu(layout.margins.top);
        let border = if context.join_previous {
            0.
        } else {
            layout.top_border.space()
        };
        (breakable, self.lu(layout.margins.top + border))
    }

    fn bottom_margin(&self, layout: &ParagraphLayout, context: &FormatContext) -> i32 {
        let border = if context.join_next {
            0.
        } else {
            layout.bottom_border.space()
        };
        self.lu(layout.margins.bottom + border)
    }
}

/// Moves inline custom items to the position of the character hosting them.
pub(crate) fn place_custom_items(run: &mut CharacterRun, lines: &[LineRecord]) {
    let mut line = 0;
    for (i, c) in run.chars_mut().iter_mut().enumerate() {
        while line + 1 < lines.len() && lines[line + 1].start <= i {
            line += 1;
        }
        let x = c.x;
        let Some(item) = c.custom.as_mut() else {
            continue;
        };
        if item.is_floating() {
            continue;
        }
        if let Some(record) = lines.get(line) {
            item.x = x;
            item.y = record.y + record.baseline - item.ascent;
        }
    }
}
