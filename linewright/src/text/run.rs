// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use unicode_segmentation::UnicodeSegmentation;

use super::{CharFlags, CustomItem, OBJECT_REPLACEMENT, SOFT_HYPHEN, TextChar};
use crate::bidi;
use crate::error::Error;
use crate::layout::Direction;
use crate::style::FormatRef;

/// The characters of one paragraph.
///
/// A run always ends with one anchor space that marks the end of the paragraph.
/// The anchor is never part of the visible text and cannot be removed; it takes
/// the format of the last visible character so that an empty last line has the
/// right height.
#[derive(Clone, Debug)]
pub struct CharacterRun {
    chars: Vec<TextChar>,
    direction: Direction,
    rtl: bool,
}

impl CharacterRun {
    /// Creates a run that holds only the end-of-paragraph anchor.
    pub fn new(anchor_format: FormatRef) -> Self {
        let mut run = Self {
            chars: vec![TextChar::new(' ', anchor_format)],
            direction: Direction::Auto,
            rtl: false,
        };
        run.analyze();
        run
    }

    /// Number of characters including the anchor.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Number of visible characters, excluding the anchor.
    pub fn text_len(&self) -> usize {
        self.chars.len() - 1
    }

    /// Returns `true` when the run holds only the anchor.
    pub fn is_empty(&self) -> bool {
        self.text_len() == 0
    }

    /// All characters, including the anchor.
    pub fn chars(&self) -> &[TextChar] {
        &self.chars
    }

    /// The character at `index`.
    pub fn get(&self, index: usize) -> Option<&TextChar> {
        self.chars.get(index)
    }

    pub(crate) fn chars_mut(&mut self) -> &mut [TextChar] {
        &mut self.chars
    }

    /// The visible text.
    pub fn text(&self) -> String {
        self.mid(0, self.text_len())
    }

    /// The visible text of `start..start + len`, clamped to the run.
    pub fn mid(&self, start: usize, len: usize) -> String {
        let end = (start + len).min(self.text_len());
        self.chars
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Requested paragraph direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sets the paragraph direction and re-runs analysis.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction != direction {
            self.direction = direction;
            self.analyze();
        }
    }

    /// Whether the resolved paragraph direction is right-to-left.
    pub fn is_right_to_left(&self) -> bool {
        self.rtl
    }

    /// Inserts `text` before `index` in `format`.
    pub fn insert(&mut self, index: usize, text: &str, format: &FormatRef) -> Result<(), Error> {
        if index > self.text_len() {
            return Err(Error::invalid_index(index, self.len()));
        }
        let new_chars = text
            .chars()
            .filter(|&c| c != '\r')
            .map(|c| TextChar::new(c, format.clone()));
        self.chars.splice(index..index, new_chars);
        self.analyze();
        Ok(())
    }

    /// Inserts a slot hosting `item` before `index`.
    pub fn insert_custom(
        &mut self,
        index: usize,
        item: CustomItem,
        format: &FormatRef,
    ) -> Result<(), Error> {
        if index > self.text_len() {
            return Err(Error::invalid_index(index, self.len()));
        }
        let mut slot = TextChar::new(OBJECT_REPLACEMENT, format.clone());
        slot.custom = Some(item);
        self.chars.insert(index, slot);
        self.analyze();
        Ok(())
    }

    /// Puts `item` into the existing slot at `index`, returning the item it replaces.
    pub(crate) fn set_custom(
        &mut self,
        index: usize,
        item: Option<CustomItem>,
    ) -> Result<Option<CustomItem>, Error> {
        if index >= self.text_len() {
            return Err(Error::invalid_index(index, self.len()));
        }
        let slot = &mut self.chars[index];
        if item.is_some() {
            slot.ch = OBJECT_REPLACEMENT;
        }
        Ok(core::mem::replace(&mut slot.custom, item))
    }

    /// Removes `len` visible characters starting at `index` and returns them.
    pub fn remove(&mut self, index: usize, len: usize) -> Result<Vec<TextChar>, Error> {
        let end = index
            .checked_add(len)
            .filter(|&end| end <= self.text_len())
            .ok_or_else(|| Error::invalid_range(index, index.saturating_add(len), self.len()))?;
        let removed = self.chars.drain(index..end).collect();
        self.analyze();
        Ok(removed)
    }

    /// Removes every visible character from `index` on, keeping the anchor.
    pub fn truncate(&mut self, index: usize) -> Vec<TextChar> {
        let index = index.min(self.text_len());
        let end = self.text_len();
        let removed = self.chars.drain(index..end).collect();
        self.analyze();
        removed
    }

    /// Appends the visible characters of `other` to the end of this run.
    pub(crate) fn append(&mut self, other: Vec<TextChar>) {
        let at = self.text_len();
        self.chars.splice(at..at, other);
        self.analyze();
    }

    /// Applies `format` to `start..start + len`.
    pub fn set_format(&mut self, start: usize, len: usize, format: &FormatRef) -> Result<(), Error> {
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.text_len())
            .ok_or_else(|| Error::invalid_range(start, start.saturating_add(len), self.len()))?;
        for c in &mut self.chars[start..end] {
            c.format = format.clone();
        }
        self.analyze();
        Ok(())
    }

    /// Whether a line may break after `index` without hyphenation.
    pub fn is_breakable(&self, index: usize) -> bool {
        index + 1 < self.chars.len() && self.chars[index + 1].flags.contains(CharFlags::SOFT_BREAK)
    }

    /// Whether a cursor may be placed at `index`.
    pub fn is_cursor_position(&self, index: usize) -> bool {
        index == self.text_len() || self.chars.get(index).is_some_and(TextChar::is_char_stop)
    }

    /// The next cursor position after `index`, or the end of the text.
    pub fn next_cursor_position(&self, index: usize) -> usize {
        let end = self.text_len();
        let mut i = index + 1;
        while i < end && !self.chars[i].is_char_stop() {
            i += 1;
        }
        i.min(end)
    }

    /// The previous cursor position before `index`, or zero.
    pub fn previous_cursor_position(&self, index: usize) -> usize {
        let mut i = index.min(self.text_len());
        while i > 0 {
            i -= 1;
            if self.chars[i].is_char_stop() {
                return i;
            }
        }
        0
    }

    /// Recomputes whitespace, break, cursor, run and direction flags.
    ///
    /// Formatting flags (`LINE_START`) are preserved.
    pub fn analyze(&mut self) {
        let len = self.chars.len();
        if len > 1 {
            self.chars[len - 1].format = self.chars[len - 2].format.clone();
        }

        let text: String = self.chars.iter().map(|c| c.ch).collect();
        let levels = bidi::resolve(&text, self.direction);
        self.rtl = levels.rtl;

        let mut stops = Vec::with_capacity(len);
        let mut byte_starts = text.grapheme_indices(true).map(|(pos, _)| pos).peekable();
        for (byte_pos, _) in text.char_indices() {
            let is_stop = byte_starts.peek() == Some(&byte_pos);
            if is_stop {
                byte_starts.next();
            }
            stops.push(is_stop);
        }

        for i in 0..len {
            let mut flags = self.chars[i].flags & CharFlags::LINE_START;
            let ch = self.chars[i].ch;
            let level = levels.levels.get(i).copied().unwrap_or(0);
            if ch.is_whitespace() {
                flags |= CharFlags::WHITE_SPACE;
            }
            if i > 0 && breaks_after(self.chars[i - 1].ch, ch) {
                flags |= CharFlags::SOFT_BREAK;
            }
            if stops.get(i).copied().unwrap_or(true) || self.chars[i].custom.is_some() {
                flags |= CharFlags::CHAR_STOP;
            }
            if level & 1 == 1 {
                flags |= CharFlags::RIGHT_TO_LEFT;
            }
            if i == 0
                || !Rc::ptr_eq(&self.chars[i - 1].format, &self.chars[i].format)
                || self.chars[i - 1].bidi_level != level
            {
                flags |= CharFlags::START_OF_RUN;
            }
            let c = &mut self.chars[i];
            c.flags = flags;
            c.bidi_level = level;
        }
    }

    /// Clears formatter output so a new pass starts from a clean state.
    pub(crate) fn reset_layout(&mut self) {
        for c in &mut self.chars {
            c.flags.remove(CharFlags::LINE_START);
            c.x = 0;
            c.width = 0;
            c.underline_width = 0.;
        }
    }
}

/// Whether a line may break between `prev` and `next`.
fn breaks_after(prev: char, next: char) -> bool {
    match prev {
        '\u{A0}' | '\u{202F}' | '\u{2007}' | '\u{2060}' => false,
        SOFT_HYPHEN | '\u{200B}' | '\n' | '\t' => true,
        '-' => next.is_alphanumeric(),
        c => c.is_whitespace() && !next.is_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextFormat;

    fn run(text: &str) -> CharacterRun {
        let format = Rc::new(TextFormat::default());
        let mut run = CharacterRun::new(format.clone());
        run.insert(0, text, &format).unwrap();
        run
    }

    #[test]
    fn anchor_is_always_present() {
        let mut r = run("abc");
        assert_eq!(r.len(), 4);
        assert_eq!(r.text(), "abc");
        assert_eq!(r.chars()[3].ch(), ' ');
        r.truncate(0);
        assert_eq!(r.len(), 1, "truncate keeps the anchor");
        assert!(r.is_empty());
        assert!(r.remove(0, 1).is_err(), "the anchor cannot be removed");
    }

    #[test]
    fn insert_and_remove() {
        let mut r = run("held");
        let format = r.chars()[0].format().clone();
        r.insert(2, "llo wor", &format).unwrap();
        assert_eq!(r.text(), "hello world");
        let removed = r.remove(5, 6).unwrap();
        assert_eq!(removed.len(), 6);
        assert_eq!(r.text(), "hello");
        assert_eq!(r.insert(9, "x", &format).unwrap_err().kind(), crate::ErrorKind::InvalidIndex);
    }

    #[test]
    fn breaks_after_spaces_only() {
        let r = run("ab cd\u{A0}ef");
        assert!(!r.is_breakable(0));
        assert!(r.is_breakable(2), "break after the space");
        assert!(!r.is_breakable(5), "no break after a no-break space");
        assert!(!r.is_breakable(r.len() - 1));
        assert!(r.chars()[5].is_stretchable());
    }

    #[test]
    fn double_spaces_break_after_the_last_space() {
        let r = run("a  b");
        assert!(!r.is_breakable(1));
        assert!(r.is_breakable(2));
    }

    #[test]
    fn soft_hyphen_and_hyphen_break() {
        let r = run("co\u{AD}op well-known");
        assert!(r.is_breakable(2));
        assert!(!r.is_breakable(9));
        assert!(r.is_breakable(10), "after the hyphen in well-known");
    }

    #[test]
    fn cursor_skips_combining_marks() {
        let r = run("e\u{301}x");
        assert!(r.is_cursor_position(0));
        assert!(!r.is_cursor_position(1), "combining acute is not a stop");
        assert_eq!(r.next_cursor_position(0), 2);
        assert_eq!(r.previous_cursor_position(2), 0);
        assert_eq!(r.next_cursor_position(2), 3, "end of text");
    }

    #[test]
    fn anchor_follows_last_format() {
        let mut r = run("ab");
        let big = Rc::new(TextFormat {
            point_size: 24.0,
            ..TextFormat::default()
        });
        r.set_format(1, 1, &big).unwrap();
        assert!(Rc::ptr_eq(r.chars()[2].format(), &big));
        assert!(r.chars()[1].flags().contains(CharFlags::START_OF_RUN));
    }

    #[test]
    fn rtl_flags_follow_levels() {
        let r = run("a \u{5d0}\u{5d1}");
        assert!(!r.chars()[0].is_right_to_left());
        assert!(r.chars()[2].is_right_to_left());
        assert!(r.chars()[2].flags().contains(CharFlags::START_OF_RUN));
    }
}
