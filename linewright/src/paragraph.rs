// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A paragraph: one character run, its layout and the lines it was broken into.

use alloc::string::String;
use alloc::vec::Vec;

use crate::layout::ParagraphLayout;
use crate::style::FormatRef;
use crate::text::CharacterRun;
use crate::units::ZoomHandler;

/// Line height reported for a character that is not on any line.
const FALLBACK_LINE_HEIGHT: i32 = 15;

/// Stable handle of a paragraph in a [`Document`](crate::Document).
///
/// Handles stay valid while the paragraph exists; a handle to a removed
/// paragraph is rejected even if its slot has been reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParagraphId {
    index: usize,
    generation: u32,
}

impl ParagraphId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

/// An axis-aligned rectangle in integer units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The bottom edge, exclusive.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// The right edge, exclusive.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }
}

/// One line of a formatted paragraph. Vertical values are in layout units
/// relative to the top of the paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineRecord {
    /// Index of the first character of the line.
    pub start: usize,
    /// Top of the line.
    pub y: i32,
    /// Distance from the top of the line to the baseline.
    pub baseline: i32,
    /// Height of the line, including `line_spacing`.
    pub height: i32,
    /// Extra space added below the line by the line-spacing mode.
    pub line_spacing: i32,
    /// Page width the line was laid out in.
    pub width: i32,
    /// Whether the line ends in a hyphenated word.
    pub hyphenated: bool,
}

/// A paragraph of a document.
///
/// Paragraphs are created and mutated through their [`Document`](crate::Document);
/// this type exposes the read side: the text, the layout and the result of the
/// last format pass.
#[derive(Clone, Debug)]
pub struct Paragraph {
    pub(crate) run: CharacterRun,
    pub(crate) layout: ParagraphLayout,
    pub(crate) lines: Vec<LineRecord>,
    pub(crate) rect: Rect,
    pub(crate) valid: bool,
    pub(crate) moved_down: bool,
    pub(crate) full_width: bool,
    pub(crate) width_used: i32,
    pub(crate) prev: Option<ParagraphId>,
    pub(crate) next: Option<ParagraphId>,
}

impl Paragraph {
    pub(crate) fn new(format: FormatRef, layout: ParagraphLayout) -> Self {
        let mut run = CharacterRun::new(format);
        run.set_direction(layout.direction);
        Self {
            run,
            layout,
            lines: Vec::new(),
            rect: Rect::default(),
            valid: false,
            moved_down: false,
            full_width: true,
            width_used: 0,
            prev: None,
            next: None,
        }
    }

    /// The characters of the paragraph, including the end-of-paragraph anchor.
    pub fn run(&self) -> &CharacterRun {
        &self.run
    }

    /// The visible text.
    pub fn text(&self) -> String {
        self.run.text()
    }

    /// Number of visible characters.
    pub fn len(&self) -> usize {
        self.run.text_len()
    }

    /// Returns `true` when the paragraph has no visible characters.
    pub fn is_empty(&self) -> bool {
        self.run.is_empty()
    }

    /// The paragraph-level layout.
    pub fn layout(&self) -> &ParagraphLayout {
        &self.layout
    }

    /// Previous paragraph in document order.
    pub fn prev(&self) -> Option<ParagraphId> {
        self.prev
    }

    /// Next paragraph in document order.
    pub fn next(&self) -> Option<ParagraphId> {
        self.next
    }

    /// Whether the line records reflect the current text and layout.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Marks the line records stale.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Whether the flow moved part of the paragraph down, e.g. past a page break.
    pub fn was_moved_down(&self) -> bool {
        self.moved_down
    }

    /// Whether every line got the full width of the flow.
    pub fn is_full_width(&self) -> bool {
        self.full_width
    }

    /// Bounding rectangle in layout units, relative to the document.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Height in layout units, margins included.
    pub fn height(&self) -> i32 {
        self.rect.height
    }

    /// Largest x reached by a visible character, in layout units.
    pub fn width_used(&self) -> i32 {
        self.width_used
    }

    /// The lines of the last format pass.
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `line`.
    pub fn line(&self, line: usize) -> Option<&LineRecord> {
        self.lines.get(line)
    }

    /// The line holding the character at `index`.
    pub fn line_of_char(&self, index: usize) -> Option<usize> {
        if index >= self.run.len() || self.lines.is_empty() {
            return None;
        }
        Some(self.lines.partition_point(|line| line.start <= index) - 1)
    }

    /// Height of the line holding the character at `index`.
    ///
    /// Asking for a character that is not on a line is a caller error; release
    /// builds answer with a fallback height.
    pub fn line_height_of_char(&self, index: usize) -> i32 {
        match self.line_of_char(index) {
            Some(line) => self.lines[line].height,
            None => {
                debug_assert!(
                    false,
                    "character {index} is not on a line of a paragraph with {} characters",
                    self.run.len()
                );
                log::warn!("no line for character {index}, using fallback height");
                FALLBACK_LINE_HEIGHT
            }
        }
    }

    /// Document x of the character at `index`, in layout units.
    pub fn char_x(&self, index: usize) -> Option<i32> {
        self.run.get(index).map(|c| self.rect.x + c.x())
    }

    /// Pixel x of the character at `index`.
    pub fn char_pixel_x(&self, index: usize, zoom: &ZoomHandler) -> Option<i32> {
        self.char_x(index).map(|x| zoom.layout_unit_to_pixel_x(x))
    }

    /// Pixel width of the character at `index`.
    ///
    /// Adjacent characters tile exactly: the pixel x of a character plus its
    /// pixel width is the pixel x of the character that follows it.
    pub fn char_pixel_width(&self, index: usize, zoom: &ZoomHandler) -> Option<i32> {
        let c = self.run.get(index)?;
        Some(zoom.layout_unit_to_pixel_x_span(self.rect.x + c.x(), c.width()))
    }

    /// Bounding rectangle in pixels.
    ///
    /// Vertically adjacent paragraphs map to adjacent pixel rectangles.
    pub fn pixel_rect(&self, zoom: &ZoomHandler) -> Rect {
        let r = self.rect;
        Rect {
            x: zoom.layout_unit_to_pixel_x(r.x),
            y: zoom.layout_unit_to_pixel_y(r.y),
            width: zoom.layout_unit_to_pixel_x_span(r.x, r.width),
            height: zoom.layout_unit_to_pixel_y_span(r.y, r.height),
        }
    }

    /// Pixel position and height of the line at `line`: `(y, height, baseline)`.
    pub fn line_pixel_metrics(&self, line: usize, zoom: &ZoomHandler) -> Option<(i32, i32, i32)> {
        let record = self.lines.get(line)?;
        let top = self.rect.y + record.y;
        Some((
            zoom.layout_unit_to_pixel_y(top),
            zoom.layout_unit_to_pixel_y_span(top, record.height),
            zoom.layout_unit_to_pixel_y_span(top, record.baseline),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextFormat;
    use crate::units::ZoomConfig;
    use alloc::rc::Rc;
    use alloc::vec;

    fn paragraph(text: &str) -> Paragraph {
        let format = Rc::new(TextFormat::default());
        let mut p = Paragraph::new(format.clone(), ParagraphLayout::default());
        p.run.insert(0, text, &format).unwrap();
        p
    }

    fn line(start: usize, y: i32, height: i32) -> LineRecord {
        LineRecord {
            start,
            y,
            height,
            baseline: height - 2,
            ..LineRecord::default()
        }
    }

    #[test]
    fn line_lookup_by_character() {
        let mut p = paragraph("aaaa bbbb cccc");
        p.lines = vec![line(0, 0, 200), line(5, 200, 240), line(10, 440, 200)];
        assert_eq!(p.line_of_char(0), Some(0));
        assert_eq!(p.line_of_char(4), Some(0));
        assert_eq!(p.line_of_char(5), Some(1));
        assert_eq!(p.line_of_char(14), Some(2), "the anchor is on the last line");
        assert_eq!(p.line_of_char(15), None);
        assert_eq!(p.line_height_of_char(7), 240);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn unknown_character_uses_fallback_height() {
        let p = paragraph("abc");
        assert_eq!(p.line_height_of_char(1), FALLBACK_LINE_HEIGHT);
    }

    #[test]
    fn pixel_rectangles_of_stacked_paragraphs_touch() {
        let zoom = ZoomHandler::new(ZoomConfig {
            zoom: 133,
            ..ZoomConfig::default()
        });
        let mut a = paragraph("a");
        let mut b = paragraph("b");
        a.rect = Rect::new(0, 0, 9000, 257);
        b.rect = Rect::new(0, 257, 9000, 311);
        let pa = a.pixel_rect(&zoom);
        let pb = b.pixel_rect(&zoom);
        assert_eq!(pa.bottom(), pb.y, "no gap or overlap between {pa:?} and {pb:?}");
    }

    #[test]
    fn ids_compare_by_slot_and_generation() {
        assert_ne!(ParagraphId::new(1, 0), ParagraphId::new(1, 1));
        assert_eq!(ParagraphId::new(1, 2).index(), 1);
        assert_eq!(ParagraphId::new(1, 2).generation(), 2);
    }
}
