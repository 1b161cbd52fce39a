// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry of the area text flows into.
//!
//! The formatter never decides where a line may go on its own: it asks the
//! document's [`Flow`] for the margins at a vertical position and for the
//! shift needed to keep a line off a page boundary. All values are in layout
//! units, relative to the top of the document.

use alloc::vec::Vec;

use crate::paragraph::ParagraphId;
use crate::text::{CustomItem, Placement};

/// Horizontal geometry available to a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarginAdjustment {
    /// Left margin of the line.
    pub left: i32,
    /// Right margin of the line.
    pub right: i32,
    /// Width of the page the line is on, margins included.
    pub page_width: i32,
}

/// A provider of available width and height as a function of vertical position.
///
/// Flows may hold floating-item state that changes while a document is
/// formatted, so paragraphs must be formatted in document order.
pub trait Flow {
    /// Margins for a line at `y` with `height`, given the paragraph's own
    /// `left` and `right` margins.
    ///
    /// `min_width` is the width of the first character of the line, which
    /// must fit for the line to be useful.
    fn adjust_margins(
        &self,
        y: i32,
        height: i32,
        min_width: i32,
        left: i32,
        right: i32,
    ) -> MarginAdjustment;

    /// Vertical shift needed to place a line of `height` at `y`, e.g. to move
    /// it past a page boundary. Zero when the line fits where it is.
    fn adjust_flow(&self, y: i32, width: i32, height: i32) -> i32;

    /// Shift that moves `y` to the top of the next page. Zero when `y`
    /// already starts a page or the flow is not split into pages.
    fn page_break(&self, y: i32) -> i32 {
        let _ = y;
        0
    }

    /// Height available for text, or `None` when unbounded.
    fn available_height(&self) -> Option<i32>;

    /// Overall width of the flow.
    fn width(&self) -> i32;

    /// Changes the overall width of the flow.
    fn set_width(&mut self, width: i32);

    /// Registers a floating item placed by `paragraph`, so that later lines
    /// wrap around it.
    fn register_floating_item(&mut self, paragraph: ParagraphId, item: &CustomItem) {
        let _ = (paragraph, item);
    }

    /// Forgets every floating item placed by `paragraph`.
    fn unregister_floating_items(&mut self, paragraph: ParagraphId) {
        let _ = paragraph;
    }
}

/// Side of the flow an [`Exclusion`] is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Anchored to the left edge.
    #[default]
    Left,
    /// Anchored to the right edge.
    Right,
}

/// A rectangle anchored to one side of the flow that text must avoid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exclusion {
    /// Anchoring side.
    pub side: Side,
    /// Top edge.
    pub y: i32,
    /// Vertical extent.
    pub height: i32,
    /// Extent from the anchoring side.
    pub width: i32,
}

impl Exclusion {
    /// Creates an exclusion.
    pub fn new(side: Side, y: i32, height: i32, width: i32) -> Self {
        Self {
            side,
            y,
            height,
            width,
        }
    }

    fn overlaps(&self, y: i32, height: i32) -> bool {
        let bottom = y + height.max(1);
        self.y < bottom && y < self.y + self.height
    }
}

/// A flow of fixed width, optionally split into pages of fixed height.
///
/// Text avoids the exclusions overlapping a line and the floating items
/// registered by formatted paragraphs.
#[derive(Clone, Debug, Default)]
pub struct FrameFlow {
    width: i32,
    page_height: Option<i32>,
    page_count: u32,
    exclusions: Vec<Exclusion>,
    floating: Vec<(ParagraphId, Exclusion)>,
}

impl FrameFlow {
    /// A flow of `width` with unbounded height.
    pub fn new(width: i32) -> Self {
        Self {
            width,
            page_count: 1,
            ..Self::default()
        }
    }

    /// A flow of `width` made of `page_count` pages of `page_height` each.
    pub fn paged(width: i32, page_height: i32, page_count: u32) -> Self {
        Self {
            width,
            page_height: Some(page_height.max(1)),
            page_count,
            ..Self::default()
        }
    }

    /// Height of each page, or `None` for an unbounded flow.
    pub fn page_height(&self) -> Option<i32> {
        self.page_height
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Appends a page, making room for text that did not fit.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Adds a rectangle that text must avoid.
    pub fn add_exclusion(&mut self, exclusion: Exclusion) {
        self.exclusions.push(exclusion);
    }

    /// Removes every exclusion added with [`FrameFlow::add_exclusion`].
    pub fn clear_exclusions(&mut self) {
        self.exclusions.clear();
    }

    /// The exclusions added with [`FrameFlow::add_exclusion`].
    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    /// Number of floating items currently wrapping text.
    pub fn floating_count(&self) -> usize {
        self.floating.len()
    }
}

impl Flow for FrameFlow {
    fn adjust_margins(
        &self,
        y: i32,
        height: i32,
        _min_width: i32,
        left: i32,
        right: i32,
    ) -> MarginAdjustment {
        let mut adjusted = MarginAdjustment {
            left,
            right,
            page_width: self.width,
        };
        let floating = self.floating.iter().map(|(_, exclusion)| exclusion);
        for exclusion in self.exclusions.iter().chain(floating) {
            if !exclusion.overlaps(y, height) {
                continue;
            }
            match exclusion.side {
                Side::Left => adjusted.left = adjusted.left.max(exclusion.width),
                Side::Right => adjusted.right = adjusted.right.max(exclusion.width),
            }
        }
        adjusted
    }

    fn adjust_flow(&self, y: i32, _width: i32, height: i32) -> i32 {
        let Some(page_height) = self.page_height else {
            return 0;
        };
        if height <= 0 || height > page_height || y < 0 {
            return 0;
        }
        let page = y / page_height;
        let page_bottom = (page + 1) * page_height;
        if y + height > page_bottom {
            page_bottom - y
        } else {
            0
        }
    }

    fn page_break(&self, y: i32) -> i32 {
        match self.page_height {
            Some(page_height) if y > 0 && y % page_height != 0 => page_height - y % page_height,
            _ => 0,
        }
    }

    fn available_height(&self) -> Option<i32> {
        let page_height = self.page_height?;
        let pages = i32::try_from(self.page_count).unwrap_or(i32::MAX);
        Some(page_height.saturating_mul(pages))
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    fn register_floating_item(&mut self, paragraph: ParagraphId, item: &CustomItem) {
        let side = match item.placement {
            Placement::Inline => return,
            Placement::Left => Side::Left,
            Placement::Right => Side::Right,
        };
        let width = match side {
            Side::Left => item.x + item.width,
            Side::Right => self.width - item.x,
        };
        self.floating
            .push((paragraph, Exclusion::new(side, item.y, item.height, width)));
    }

    fn unregister_floating_items(&mut self, paragraph: ParagraphId) {
        self.floating.retain(|(owner, _)| *owner != paragraph);
    }
}
