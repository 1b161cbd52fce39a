// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph-level layout properties.

mod border;
mod tabs;

pub use border::{Border, BorderStyle};
pub use tabs::{TabFilling, TabList, TabStop, TabType};

use peniko::Color;

use crate::counter::ParagraphCounter;
use crate::util::{color_key, nearly_eq};

/// Horizontal alignment of the lines of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Alignment {
    /// This is [`Alignment::Left`] for LTR paragraphs and [`Alignment::Right`] for RTL ones.
    #[default]
    Start,
    /// Align lines to the left edge.
    Left,
    /// Center each line between the margins.
    Center,
    /// Align lines to the right edge.
    Right,
    /// Stretch whitespace so lines fill the width, except for the last line.
    Justified,
}

impl Alignment {
    /// Resolves [`Alignment::Start`] against the paragraph direction.
    pub fn resolve(self, rtl: bool) -> Self {
        match (self, rtl) {
            (Self::Start, false) => Self::Left,
            (Self::Start, true) => Self::Right,
            (other, _) => other,
        }
    }
}

/// Requested base direction of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Determined by the first strong character.
    #[default]
    Auto,
    /// Left to right.
    LeftToRight,
    /// Right to left.
    RightToLeft,
}

/// Paragraph margins, in points.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct Margins {
    /// Space before every line.
    pub left: f64,
    /// Space after every line.
    pub right: f64,
    /// Extra indent of the first line; may be negative for hanging indents.
    pub first_line: f64,
    /// Space above the paragraph.
    pub top: f64,
    /// Space below the paragraph.
    pub bottom: f64,
}

/// Extra vertical space between lines.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub enum LineSpacing {
    /// No extra space.
    #[default]
    Single,
    /// Half a line of extra space.
    OneAndHalf,
    /// One line of extra space.
    Double,
    /// The line height multiplied by a factor.
    Multiple(f64),
    /// A fixed amount of extra space, in points.
    Custom(f64),
    /// Lines are at least this tall, in points.
    AtLeast(f64),
    /// Lines are exactly this tall, in points.
    Fixed(f64),
}

bitflags::bitflags! {
    /// Page-breaking behavior of a paragraph.
    #[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
    pub struct PageBreaking: u8 {
        /// Never split the paragraph across pages.
        const KEEP_LINES_TOGETHER = 1 << 0;
        /// Start the paragraph on a new page.
        const HARD_BREAK_BEFORE = 1 << 1;
        /// Start the next paragraph on a new page.
        const HARD_BREAK_AFTER = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Groups of paragraph layout properties, as reported by [`ParagraphLayout::compare`].
    #[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
    pub struct LayoutChanges: u16 {
        /// [`ParagraphLayout::alignment`].
        const ALIGNMENT = 1 << 0;
        /// [`ParagraphLayout::margins`].
        const MARGINS = 1 << 1;
        /// [`ParagraphLayout::line_spacing`].
        const LINE_SPACING = 1 << 2;
        /// The four borders and [`ParagraphLayout::join_border`].
        const BORDERS = 1 << 3;
        /// [`ParagraphLayout::counter`].
        const BULLET_NUMBER = 1 << 4;
        /// [`ParagraphLayout::tabs`].
        const TABULATOR = 1 << 5;
        /// [`ParagraphLayout::background`].
        const BACKGROUND_COLOR = 1 << 6;
        /// [`ParagraphLayout::page_breaking`].
        const PAGE_BREAKING = 1 << 7;
        /// [`ParagraphLayout::direction`].
        const DIRECTION = 1 << 8;
    }
}

/// Everything about a paragraph's appearance that is not per character.
///
/// Use [`compare`](Self::compare) to find out which property groups differ.
#[derive(Clone, Debug)]
pub struct ParagraphLayout {
    /// Line alignment.
    pub alignment: Alignment,
    /// Margins in points.
    pub margins: Margins,
    /// Inter-line spacing.
    pub line_spacing: LineSpacing,
    /// Left border.
    pub left_border: Border,
    /// Right border.
    pub right_border: Border,
    /// Top border.
    pub top_border: Border,
    /// Bottom border.
    pub bottom_border: Border,
    /// Merge borders with a neighbor that has identical borders.
    pub join_border: bool,
    /// Background fill.
    pub background: Option<Color>,
    /// Tab stops, ordered by position.
    pub tabs: TabList,
    /// Base direction.
    pub direction: Direction,
    /// Page-breaking behavior.
    pub page_breaking: PageBreaking,
    /// Numbering or bullet, if any.
    pub counter: Option<ParagraphCounter>,
    /// Whether the paragraph's style is an outline (heading) style.
    pub outline: bool,
}

impl Default for ParagraphLayout {
    fn default() -> Self {
        Self {
            alignment: Alignment::Start,
            margins: Margins::default(),
            line_spacing: LineSpacing::Single,
            left_border: Border::default(),
            right_border: Border::default(),
            top_border: Border::default(),
            bottom_border: Border::default(),
            join_border: true,
            background: None,
            tabs: TabList::new(),
            direction: Direction::Auto,
            page_breaking: PageBreaking::empty(),
            counter: None,
            outline: false,
        }
    }
}

impl ParagraphLayout {
    /// Returns the property groups in which `self` and `other` differ.
    pub fn compare(&self, other: &Self) -> LayoutChanges {
        let mut changes = LayoutChanges::empty();
        if self.alignment != other.alignment {
            changes |= LayoutChanges::ALIGNMENT;
        }
        if !margins_eq(&self.margins, &other.margins) {
            changes |= LayoutChanges::MARGINS;
        }
        if self.line_spacing != other.line_spacing {
            changes |= LayoutChanges::LINE_SPACING;
        }
        if self.left_border != other.left_border
            || self.right_border != other.right_border
            || self.top_border != other.top_border
            || self.bottom_border != other.bottom_border
            || self.join_border != other.join_border
        {
            changes |= LayoutChanges::BORDERS;
        }
        if self.counter != other.counter || self.outline != other.outline {
            changes |= LayoutChanges::BULLET_NUMBER;
        }
        if self.tabs != other.tabs {
            changes |= LayoutChanges::TABULATOR;
        }
        if self.background.map(color_key) != other.background.map(color_key) {
            changes |= LayoutChanges::BACKGROUND_COLOR;
        }
        if self.page_breaking != other.page_breaking {
            changes |= LayoutChanges::PAGE_BREAKING;
        }
        if self.direction != other.direction {
            changes |= LayoutChanges::DIRECTION;
        }
        changes
    }

    /// Copies the property groups selected by `changes` from `other`.
    pub fn apply(&mut self, other: &Self, changes: LayoutChanges) {
        if changes.contains(LayoutChanges::ALIGNMENT) {
            self.alignment = other.alignment;
        }
        if changes.contains(LayoutChanges::MARGINS) {
            self.margins = other.margins;
        }
        if changes.contains(LayoutChanges::LINE_SPACING) {
            self.line_spacing = other.line_spacing;
        }
        if changes.contains(LayoutChanges::BORDERS) {
            self.left_border = other.left_border;
            self.right_border = other.right_border;
            self.top_border = other.top_border;
            self.bottom_border = other.bottom_border;
            self.join_border = other.join_border;
        }
        if changes.contains(LayoutChanges::BULLET_NUMBER) {
            self.counter.clone_from(&other.counter);
            self.outline = other.outline;
        }
        if changes.contains(LayoutChanges::TABULATOR) {
            self.tabs.clone_from(&other.tabs);
        }
        if changes.contains(LayoutChanges::BACKGROUND_COLOR) {
            self.background = other.background;
        }
        if changes.contains(LayoutChanges::PAGE_BREAKING) {
            self.page_breaking = other.page_breaking;
        }
        if changes.contains(LayoutChanges::DIRECTION) {
            self.direction = other.direction;
        }
    }

    /// Whether this paragraph's borders can merge with `other`'s.
    pub(crate) fn borders_join_with(&self, other: &Self) -> bool {
        self.join_border
            && self.left_border == other.left_border
            && self.right_border == other.right_border
            && self.top_border == other.top_border
            && self.bottom_border == other.bottom_border
    }

    /// Sets the tab stops, sorting them by position.
    pub fn set_tabs(&mut self, tabs: impl IntoIterator<Item = TabStop>) {
        self.tabs = tabs.into_iter().collect();
        self.tabs.sort_by(|a, b| a.position.total_cmp(&b.position));
    }
}

fn margins_eq(a: &Margins, b: &Margins) -> bool {
    nearly_eq(a.left, b.left)
        && nearly_eq(a.right, b.right)
        && nearly_eq(a.first_line, b.first_line)
        && nearly_eq(a.top, b.top)
        && nearly_eq(a.bottom, b.bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{CounterStyle, Numbering};

    #[test]
    fn defaults() {
        let layout = ParagraphLayout::default();
        assert_eq!(layout.alignment, Alignment::Start);
        assert_eq!(layout.line_spacing, LineSpacing::Single);
        assert!(layout.join_border, "borders join by default");
        assert!(layout.counter.is_none());
    }

    #[test]
    fn compare_reports_changed_groups() {
        let a = ParagraphLayout::default();
        let mut b = a.clone();
        assert!(a.compare(&b).is_empty());
        b.alignment = Alignment::Justified;
        b.margins.left = 10.0;
        b.counter = Some(ParagraphCounter::new(Numbering::List, CounterStyle::Arabic));
        assert_eq!(
            a.compare(&b),
            LayoutChanges::ALIGNMENT | LayoutChanges::MARGINS | LayoutChanges::BULLET_NUMBER
        );
    }

    #[test]
    fn apply_copies_selected_groups_only() {
        let mut a = ParagraphLayout::default();
        let b = ParagraphLayout {
            alignment: Alignment::Center,
            line_spacing: LineSpacing::Double,
            ..ParagraphLayout::default()
        };
        a.apply(&b, LayoutChanges::LINE_SPACING);
        assert_eq!(a.line_spacing, LineSpacing::Double);
        assert_eq!(a.alignment, Alignment::Start, "alignment was not selected");
    }

    #[test]
    fn start_alignment_follows_direction() {
        assert_eq!(Alignment::Start.resolve(false), Alignment::Left);
        assert_eq!(Alignment::Start.resolve(true), Alignment::Right);
        assert_eq!(Alignment::Justified.resolve(true), Alignment::Justified);
    }

    #[test]
    fn tabs_are_sorted() {
        let mut layout = ParagraphLayout::default();
        layout.set_tabs([TabStop::new(72.0, TabType::Right), TabStop::new(36.0, TabType::Left)]);
        assert_eq!(layout.tabs[0].position, 36.0);
        assert_eq!(layout.tabs[1].kind, TabType::Right);
    }
}
