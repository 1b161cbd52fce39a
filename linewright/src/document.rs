// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A document: an ordered chain of paragraphs sharing one format pool.
//!
//! Paragraphs live in an arena and are addressed by [`ParagraphId`]. The chain
//! order is kept in `prev`/`next` handles on each paragraph, so neighbors are
//! found in constant time and removing a paragraph never moves another.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::counter::{self, CounterChain, ParagraphCounter};
use crate::error::Error;
use crate::flow::{Flow, FrameFlow};
use crate::format::{self, FormatContext, Formatter, FormatterSettings};
use crate::hyphen::Hyphenator;
use crate::layout::{LayoutChanges, PageBreaking, ParagraphLayout};
use crate::metrics::FontMetrics;
use crate::paragraph::{Paragraph, ParagraphId, Rect};
use crate::style::{FormatCollection, TextFormat};
use crate::text::{CustomItem, Placement, TextChar};
use crate::units::{ZoomConfig, ZoomHandler};

/// Settings a [`Document`] is created with.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentConfig {
    /// Width of the text frame in layout units.
    pub width: i32,
    /// Unit conversion.
    pub zoom: ZoomConfig,
    /// Line breaking behavior.
    pub formatter: FormatterSettings,
    /// Format of new paragraphs.
    pub default_format: TextFormat,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            // An A4 page with one inch margins, at the default layout unit factor.
            width: 9_020,
            zoom: ZoomConfig::default(),
            formatter: FormatterSettings::default(),
            default_format: TextFormat::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    paragraph: Option<Paragraph>,
}

/// An ordered chain of paragraphs.
///
/// A document always holds at least one paragraph. It owns the format pool,
/// the zoom handler, the flow the paragraphs are laid out in and, optionally,
/// a hyphenator.
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    first: Option<ParagraphId>,
    last: Option<ParagraphId>,
    count: usize,
    formats: FormatCollection,
    zoom: ZoomHandler,
    settings: FormatterSettings,
    flow: Box<dyn Flow>,
    hyphenator: Option<Box<dyn Hyphenator>>,
    /// Owner of every custom item, by item id.
    custom_items: HashMap<u64, ParagraphId>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("paragraphs", &self.count)
            .field("formats", &self.formats.len())
            .field("zoom", &self.zoom)
            .field("settings", &self.settings)
            .field("width", &self.flow.width())
            .field("hyphenator", &self.hyphenator.is_some())
            .field("custom_items", &self.custom_items.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Creates a document holding one empty paragraph.
    pub fn new(config: DocumentConfig) -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            first: None,
            last: None,
            count: 0,
            formats: FormatCollection::new(config.default_format),
            zoom: ZoomHandler::new(config.zoom),
            settings: config.formatter,
            flow: Box::new(FrameFlow::new(config.width)),
            hyphenator: None,
            custom_items: HashMap::new(),
        };
        doc.push_back(ParagraphLayout::default());
        doc
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.count
    }

    /// The first paragraph. Only `None` while the document is being rebuilt.
    pub fn first(&self) -> Option<ParagraphId> {
        self.first
    }

    /// The last paragraph.
    pub fn last(&self) -> Option<ParagraphId> {
        self.last
    }

    /// The paragraph after `id`.
    pub fn next(&self, id: ParagraphId) -> Option<ParagraphId> {
        self.get(id)?.next
    }

    /// The paragraph before `id`.
    pub fn prev(&self, id: ParagraphId) -> Option<ParagraphId> {
        self.get(id)?.prev
    }

    /// The paragraph `id`, or `None` for a stale handle.
    pub fn get(&self, id: ParagraphId) -> Option<&Paragraph> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.paragraph.as_ref()
    }

    /// Mutable access to the paragraph `id`, e.g. to invalidate it.
    pub fn get_mut(&mut self, id: ParagraphId) -> Option<&mut Paragraph> {
        paragraph_mut(&mut self.slots, id)
    }

    fn expect(&self, id: ParagraphId) -> Result<&Paragraph, Error> {
        self.get(id)
            .ok_or_else(|| Error::unknown_paragraph(id.index()))
    }

    fn expect_mut(&mut self, id: ParagraphId) -> Result<&mut Paragraph, Error> {
        paragraph_mut(&mut self.slots, id).ok_or_else(|| Error::unknown_paragraph(id.index()))
    }

    /// Paragraphs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ParagraphId, &Paragraph)> + '_ {
        let mut next = self.first;
        core::iter::from_fn(move || {
            let id = next?;
            let paragraph = self.get(id)?;
            next = paragraph.next;
            Some((id, paragraph))
        })
    }

    fn ids(&self) -> Vec<ParagraphId> {
        self.iter().map(|(id, _)| id).collect()
    }

    fn allocate(&mut self, paragraph: Paragraph) -> ParagraphId {
        self.count += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.paragraph = Some(paragraph);
            return ParagraphId::new(index, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            paragraph: Some(paragraph),
        });
        ParagraphId::new(self.slots.len() - 1, 0)
    }

    fn new_paragraph(&self, layout: ParagraphLayout) -> Paragraph {
        Paragraph::new(self.formats.default_format(), collect_counter(layout))
    }

    fn push_back(&mut self, layout: ParagraphLayout) -> ParagraphId {
        let paragraph = self.new_paragraph(layout);
        let id = self.allocate(paragraph);
        self.link_after(self.last, id);
        id
    }

    /// Links the unlinked paragraph `id` after `after`, or first for `None`.
    fn link_after(&mut self, after: Option<ParagraphId>, id: ParagraphId) {
        let next = match after {
            Some(after) => self.get(after).and_then(|p| p.next),
            None => self.first,
        };
        if let Some(p) = paragraph_mut(&mut self.slots, id) {
            p.prev = after;
            p.next = next;
        }
        match after.and_then(|after| paragraph_mut(&mut self.slots, after)) {
            Some(p) => p.next = Some(id),
            None => self.first = Some(id),
        }
        match next.and_then(|next| paragraph_mut(&mut self.slots, next)) {
            Some(p) => p.prev = Some(id),
            None => self.last = Some(id),
        }
    }

    /// Unlinks `id` and frees its slot, returning the paragraph.
    fn release(&mut self, id: ParagraphId) -> Option<Paragraph> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let paragraph = slot.paragraph.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.count -= 1;

        match paragraph.prev.and_then(|prev| paragraph_mut(&mut self.slots, prev)) {
            Some(p) => p.next = paragraph.next,
            None => self.first = paragraph.next,
        }
        match paragraph.next.and_then(|next| paragraph_mut(&mut self.slots, next)) {
            Some(p) => p.prev = paragraph.prev,
            None => self.last = paragraph.prev,
        }
        self.flow.unregister_floating_items(id);
        self.custom_items.retain(|_, owner| *owner != id);
        Some(paragraph)
    }

    /// Inserts an empty paragraph after `after`, or at the start for `None`.
    pub fn insert_paragraph_after(
        &mut self,
        after: Option<ParagraphId>,
        layout: ParagraphLayout,
    ) -> Result<ParagraphId, Error> {
        if let Some(after) = after {
            self.expect(after)?;
        }
        let paragraph = self.new_paragraph(layout);
        let id = self.allocate(paragraph);
        self.link_after(after, id);
        if let Some(next) = self.next(id) {
            self.invalidate(next);
        }
        self.invalidate_counters_from(id);
        Ok(id)
    }

    /// Removes the paragraph `id` with its custom items.
    ///
    /// Removing the only paragraph empties it instead.
    pub fn remove_paragraph(&mut self, id: ParagraphId) -> Result<(), Error> {
        self.expect(id)?;
        if self.count == 1 {
            return self.truncate(id, 0);
        }
        let next = self.next(id);
        self.release(id);
        if let Some(next) = next {
            self.invalidate(next);
            self.invalidate_counters_from(next);
        }
        Ok(())
    }

    fn invalidate(&mut self, id: ParagraphId) {
        if let Some(p) = paragraph_mut(&mut self.slots, id) {
            p.invalidate();
        }
    }

    /// Clears cached labels from `id` on. Numbering only depends on earlier
    /// paragraphs, so nothing before `id` changes.
    fn invalidate_counters_from(&mut self, id: ParagraphId) {
        let mut current = Some(id);
        while let Some(id) = current {
            let Some(p) = paragraph_mut(&mut self.slots, id) else {
                break;
            };
            if let Some(counter) = p.layout.counter.as_mut() {
                counter.invalidate();
                p.invalidate();
            }
            current = p.next;
        }
    }

    /// Invalidates `id` after its text changed.
    fn text_changed(&mut self, id: ParagraphId) {
        if let Some(p) = paragraph_mut(&mut self.slots, id) {
            p.invalidate();
            if let Some(counter) = p.layout.counter.as_mut() {
                counter.invalidate();
            }
        }
    }

    /// Inserts `text` before character `index` in the format of the text
    /// around it.
    pub fn insert_text(&mut self, id: ParagraphId, index: usize, text: &str) -> Result<(), Error> {
        let p = self.expect(id)?;
        let at = index.saturating_sub(1).min(p.run.len() - 1);
        let format = p.run.chars()[at].format().clone();
        self.expect_mut(id)?.run.insert(index, text, &format)?;
        self.text_changed(id);
        Ok(())
    }

    /// Inserts `text` before character `index` in `format`.
    pub fn insert_formatted_text(
        &mut self,
        id: ParagraphId,
        index: usize,
        text: &str,
        format: &TextFormat,
    ) -> Result<(), Error> {
        self.expect(id)?;
        let format = self.formats.format(format);
        self.expect_mut(id)?.run.insert(index, text, &format)?;
        self.text_changed(id);
        Ok(())
    }

    /// Applies `format` to `len` characters starting at `start`.
    pub fn set_format(
        &mut self,
        id: ParagraphId,
        start: usize,
        len: usize,
        format: &TextFormat,
    ) -> Result<(), Error> {
        self.expect(id)?;
        let format = self.formats.format(format);
        self.expect_mut(id)?.run.set_format(start, len, &format)?;
        self.text_changed(id);
        Ok(())
    }

    /// Removes `len` characters starting at `index` and returns their text.
    ///
    /// Custom items in the range are unregistered.
    pub fn remove_text(&mut self, id: ParagraphId, index: usize, len: usize) -> Result<String, Error> {
        let removed = self.expect_mut(id)?.run.remove(index, len)?;
        self.forget_items(id, &removed);
        self.text_changed(id);
        Ok(removed.iter().map(TextChar::ch).collect())
    }

    /// Removes every character from `index` on.
    pub fn truncate(&mut self, id: ParagraphId, index: usize) -> Result<(), Error> {
        let removed = self.expect_mut(id)?.run.truncate(index);
        self.forget_items(id, &removed);
        self.text_changed(id);
        Ok(())
    }

    fn forget_items(&mut self, id: ParagraphId, removed: &[TextChar]) {
        let mut floating = false;
        for item in removed.iter().filter_map(TextChar::custom_item) {
            floating |= item.is_floating();
            self.custom_items.remove(&item.id);
        }
        if floating {
            self.flow.unregister_floating_items(id);
        }
    }

    /// Appends the paragraph after `id` to `id` and removes it.
    ///
    /// Returns `false` if `id` is the last paragraph.
    pub fn join(&mut self, id: ParagraphId) -> Result<bool, Error> {
        let Some(next) = self.expect(id)?.next else {
            return Ok(false);
        };
        let Some(mut removed) = self.release(next) else {
            return Ok(false);
        };
        let chars = removed.run.truncate(0);
        for item in chars.iter().filter_map(TextChar::custom_item) {
            self.custom_items.insert(item.id, id);
        }
        self.expect_mut(id)?.run.append(chars);
        self.text_changed(id);
        if let Some(after) = self.next(id) {
            self.invalidate(after);
        }
        self.invalidate_counters_from(id);
        Ok(true)
    }

    /// Moves the characters from `index` on into a new paragraph after `id`
    /// with the same layout.
    pub fn split_paragraph(&mut self, id: ParagraphId, index: usize) -> Result<ParagraphId, Error> {
        let p = self.expect(id)?;
        if index > p.run.text_len() {
            return Err(Error::invalid_index(index, p.run.len()));
        }
        let layout = p.layout.clone();
        let moved = self.expect_mut(id)?.run.truncate(index);
        let new_id = self.insert_paragraph_after(Some(id), layout)?;
        for item in moved.iter().filter_map(TextChar::custom_item) {
            self.custom_items.insert(item.id, new_id);
        }
        if moved.iter().any(|c| c.custom_item().is_some_and(CustomItem::is_floating)) {
            self.flow.unregister_floating_items(id);
        }
        self.expect_mut(new_id)?.run.append(moved);
        self.text_changed(id);
        self.text_changed(new_id);
        self.invalidate_counters_from(id);
        Ok(new_id)
    }

    /// Inserts a slot hosting `item` before character `index`.
    pub fn insert_custom_item(
        &mut self,
        id: ParagraphId,
        index: usize,
        item: CustomItem,
    ) -> Result<(), Error> {
        let p = self.expect(id)?;
        let at = index.saturating_sub(1).min(p.run.len() - 1);
        let format = p.run.chars()[at].format().clone();
        let item_id = item.id;
        self.expect_mut(id)?.run.insert_custom(index, item, &format)?;
        if let Some(previous) = self.custom_items.insert(item_id, id) {
            log::warn!("custom item {item_id} was already registered in {previous:?}");
        }
        self.text_changed(id);
        Ok(())
    }

    /// Puts `item` into the existing character slot at `index`.
    pub fn set_custom_item(
        &mut self,
        id: ParagraphId,
        index: usize,
        item: CustomItem,
    ) -> Result<Option<CustomItem>, Error> {
        let item_id = item.id;
        let replaced = self.expect_mut(id)?.run.set_custom(index, Some(item))?;
        if let Some(old) = &replaced {
            self.custom_items.remove(&old.id);
        }
        self.custom_items.insert(item_id, id);
        self.text_changed(id);
        Ok(replaced)
    }

    /// The item with `item_id` and the paragraph hosting it.
    pub fn custom_item(&self, item_id: u64) -> Option<(ParagraphId, &CustomItem)> {
        let owner = *self.custom_items.get(&item_id)?;
        let item = self
            .get(owner)?
            .run
            .chars()
            .iter()
            .filter_map(TextChar::custom_item)
            .find(|item| item.id == item_id)?;
        Some((owner, item))
    }

    /// Removes the item with `item_id` together with its character slot.
    pub fn remove_custom_item(&mut self, item_id: u64) -> Option<CustomItem> {
        let owner = *self.custom_items.get(&item_id)?;
        let index = self
            .get(owner)?
            .run
            .chars()
            .iter()
            .position(|c| c.custom_item().is_some_and(|item| item.id == item_id))?;
        let mut removed = self.remove_chars(owner, index)?;
        removed.custom.take()
    }

    fn remove_chars(&mut self, id: ParagraphId, index: usize) -> Option<TextChar> {
        let removed = paragraph_mut(&mut self.slots, id)?.run.remove(index, 1).ok()?;
        self.forget_items(id, &removed);
        self.text_changed(id);
        removed.into_iter().next()
    }

    /// Copies the property groups selected by `changes` from `layout`.
    ///
    /// A counter without numbering is dropped unless the paragraph is part of
    /// an outline, where it keeps the depth for an empty label.
    pub fn set_layout(
        &mut self,
        id: ParagraphId,
        layout: &ParagraphLayout,
        changes: LayoutChanges,
    ) -> Result<(), Error> {
        let p = self.expect_mut(id)?;
        let effective = changes & p.layout.compare(layout);
        if effective.is_empty() {
            return Ok(());
        }
        p.layout.apply(layout, effective);
        if effective.contains(LayoutChanges::BULLET_NUMBER) {
            p.layout = collect_counter(core::mem::take(&mut p.layout));
        }
        if effective.contains(LayoutChanges::DIRECTION) {
            p.run.set_direction(p.layout.direction);
        }
        p.invalidate();
        let (prev, next) = (p.prev, p.next);
        if effective.contains(LayoutChanges::PAGE_BREAKING) {
            if let Some(next) = next {
                self.invalidate(next);
            }
        }
        if effective.intersects(LayoutChanges::BORDERS | LayoutChanges::MARGINS) {
            // Neighbors may join borders with this paragraph or move.
            if let Some(prev) = prev {
                self.invalidate(prev);
            }
            if let Some(next) = next {
                self.invalidate(next);
            }
        }
        if effective.intersects(LayoutChanges::BULLET_NUMBER | LayoutChanges::DIRECTION) {
            self.invalidate_counters_from(id);
        }
        Ok(())
    }

    /// The number of the counter of `id`.
    pub fn counter_number(&mut self, id: ParagraphId) -> Option<u32> {
        counter::number(self, id)
    }

    /// The full label of the counter of `id`, empty without a counter.
    pub fn counter_text(&mut self, id: ParagraphId) -> String {
        counter::text(self, id)
    }

    /// Width of the label of `id` in layout units.
    pub fn counter_width(&mut self, id: ParagraphId, metrics: &dyn FontMetrics) -> i32 {
        let Some(p) = self.get(id) else {
            return 0;
        };
        if p.layout.counter.is_none() {
            return 0;
        }
        let format = p.run.chars()[0].format().clone();
        let zoom = self.zoom.clone();
        counter::width(self, id, &format, metrics, &zoom)
    }

    /// Offset of the label glyphs within the label box of `id`.
    pub fn counter_bullet_x(&self, id: ParagraphId, metrics: &dyn FontMetrics) -> i32 {
        let Some(p) = self.get(id) else {
            return 0;
        };
        counter::bullet_x(self, id, p.run.chars()[0].format(), metrics, &self.zoom)
    }

    /// Formats `id` if it is invalid. Returns `false` when the paragraph did
    /// not fit in the flow; it then stays invalid so a later pass retries.
    pub fn format_paragraph(
        &mut self,
        id: ParagraphId,
        metrics: &dyn FontMetrics,
    ) -> Result<bool, Error> {
        let p = self.expect(id)?;
        if p.valid {
            return Ok(true);
        }
        let (prev, next) = (p.prev, p.next);
        let y = prev
            .and_then(|prev| self.get(prev))
            .map_or(0, |prev| prev.rect.bottom());
        let joins = |other: Option<ParagraphId>| {
            other
                .and_then(|other| self.get(other))
                .is_some_and(|other| p.layout.borders_join_with(&other.layout))
        };
        let (join_previous, join_next) = (joins(prev), joins(next));
        let break_before = p.layout.page_breaking.contains(PageBreaking::HARD_BREAK_BEFORE)
            || prev.and_then(|prev| self.get(prev)).is_some_and(|prev| {
                prev.layout
                    .page_breaking
                    .contains(PageBreaking::HARD_BREAK_AFTER)
            });
        let counter_width = self.counter_width(id, metrics);
        let mut context = FormatContext {
            y,
            has_previous: prev.is_some(),
            join_previous,
            join_next,
            counter_width,
            break_before,
        };

        self.flow.unregister_floating_items(id);
        let mut formatter = Formatter::new(metrics, &self.zoom, &self.settings);
        if let Some(hyphenator) = self.hyphenator.as_deref() {
            formatter = formatter.with_hyphenator(hyphenator);
        }
        let flow = &*self.flow;
        let Some(p) = paragraph_mut(&mut self.slots, id) else {
            return Err(Error::unknown_paragraph(id.index()));
        };
        let (old_y, old_height) = (p.rect.y, p.rect.height);
        let keep_together = p.layout.page_breaking.contains(PageBreaking::KEEP_LINES_TOGETHER);

        let mut outcome = formatter.format(&mut p.run, &p.layout, &context, flow);
        let mut height = outcome.height;
        let mut moved_down = false;
        if self.settings.page_breaking {
            let top = outcome.lines.first().map_or(0, |line| line.y);
            let (h, moved) =
                formatter.format_vertically(&mut outcome.lines, &p.layout, &context, flow, keep_together);
            height = h;
            moved_down = moved;
            let shift = outcome.lines.first().map_or(0, |line| line.y) - top;
            if shift > 0 {
                // The first line moved to another page; its margins may differ there.
                log::debug!("paragraph {id:?} moved down by {shift}, formatting again");
                context.y += shift;
                context.break_before = false;
                outcome = formatter.format(&mut p.run, &p.layout, &context, flow);
                let (h, _) = formatter.format_vertically(
                    &mut outcome.lines,
                    &p.layout,
                    &context,
                    flow,
                    keep_together,
                );
                for line in &mut outcome.lines {
                    line.y += shift;
                }
                height = h + shift;
            }
        }

        format::place_custom_items(&mut p.run, &outcome.lines);
        p.lines = outcome.lines;
        p.width_used = outcome.width_used;
        p.full_width = outcome.full_width;
        p.moved_down = moved_down;
        p.rect = Rect::new(0, y, flow.width(), height);
        p.valid = outcome.complete;
        log::trace!(
            "formatted {id:?}: {} lines, height {height}, complete {}",
            p.lines.len(),
            outcome.complete
        );

        let flow_width = flow.width();
        let floating: Vec<CustomItem> = p
            .run
            .chars_mut()
            .iter_mut()
            .filter_map(|c| c.custom.as_mut())
            .filter(|item| item.is_floating())
            .map(|item| {
                item.x = match item.placement {
                    Placement::Right => flow_width - item.width,
                    Placement::Left | Placement::Inline => 0,
                };
                item.y = 0;
                CustomItem { y: y + item.y, ..item.clone() }
            })
            .collect();
        for item in &floating {
            self.flow.register_floating_item(id, item);
        }

        if height != old_height || y != old_y {
            self.shift_following(id);
        }
        Ok(outcome.complete)
    }

    /// Moves the paragraphs after `id` so they start where their predecessor
    /// ends.
    ///
    /// Paragraphs that cannot simply move are invalidated instead: those that
    /// do not span the full width, whose lines the flow moved down, or that
    /// carry floating items.
    fn shift_following(&mut self, id: ParagraphId) {
        let Some(mut bottom) = self.get(id).map(|p| p.rect.bottom()) else {
            return;
        };
        let mut current = self.next(id);
        while let Some(id) = current {
            let Some(p) = paragraph_mut(&mut self.slots, id) else {
                break;
            };
            let delta = bottom - p.rect.y;
            if delta == 0 && p.valid {
                break;
            }
            let floats = p
                .run
                .chars()
                .iter()
                .any(|c| c.custom_item().is_some_and(CustomItem::is_floating));
            if p.moved_down {
                log::debug!("stopping shift at {id:?}, which the flow moved down");
                p.invalidate();
                break;
            }
            if !p.full_width || floats || self.settings.page_breaking {
                p.invalidate();
            }
            p.rect.y += delta;
            bottom = p.rect.bottom();
            current = p.next;
        }
    }

    /// Formats every invalid paragraph in document order. Returns `false` if
    /// any paragraph did not fit.
    pub fn format_all(&mut self, metrics: &dyn FontMetrics) -> bool {
        let mut complete = true;
        for id in self.ids() {
            match self.format_paragraph(id, metrics) {
                Ok(done) => complete &= done,
                Err(err) => {
                    log::warn!("skipping paragraph: {err}");
                    complete = false;
                }
            }
        }
        complete
    }

    /// Marks every paragraph for formatting.
    pub fn invalidate_all(&mut self) {
        for slot in &mut self.slots {
            if let Some(p) = slot.paragraph.as_mut() {
                p.invalidate();
            }
        }
    }

    /// Replaces the content with `text`, one paragraph per line.
    pub fn set_plain_text(&mut self, text: &str) {
        // Released slots get a new generation, so old handles stay stale.
        for id in self.ids() {
            self.release(id);
        }

        let format = self.formats.default_format();
        for line in text.split('\n') {
            let id = self.push_back(ParagraphLayout::default());
            if let Some(p) = paragraph_mut(&mut self.slots, id) {
                if let Err(err) = p.run.insert(0, line, &format) {
                    log::warn!("dropping line: {err}");
                }
            }
        }
        self.formats.purge();
    }

    /// The text of all paragraphs, joined with `\n`.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for (id, p) in self.iter() {
            if Some(id) != self.first {
                text.push('\n');
            }
            text.push_str(&p.text());
        }
        text
    }

    /// Number of characters, counting one separator between paragraphs.
    pub fn length(&self) -> usize {
        self.iter().map(|(_, p)| p.len()).sum::<usize>() + self.count - 1
    }

    /// Bottom of the last paragraph in layout units.
    pub fn height(&self) -> i32 {
        self.last
            .and_then(|id| self.get(id))
            .map_or(0, |p| p.rect.bottom())
    }

    /// Largest x reached by any paragraph, in layout units.
    pub fn width_used(&self) -> i32 {
        self.iter()
            .map(|(_, p)| p.rect.x + p.width_used)
            .max()
            .unwrap_or(0)
    }

    /// The unit converter.
    pub fn zoom(&self) -> &ZoomHandler {
        &self.zoom
    }

    /// Mutable access to the unit converter. Zooming never changes line breaks,
    /// so no paragraph is invalidated.
    pub fn zoom_mut(&mut self) -> &mut ZoomHandler {
        &mut self.zoom
    }

    /// The flow paragraphs are laid out in.
    pub fn flow(&self) -> &dyn Flow {
        &*self.flow
    }

    /// Replaces the flow and invalidates every paragraph.
    pub fn set_flow(&mut self, flow: Box<dyn Flow>) {
        self.flow = flow;
        self.invalidate_all();
    }

    /// Changes the width of the flow and invalidates every paragraph.
    pub fn set_width(&mut self, width: i32) {
        self.flow.set_width(width);
        self.invalidate_all();
    }

    /// Sets or clears the hyphenator and invalidates every paragraph.
    pub fn set_hyphenator(&mut self, hyphenator: Option<Box<dyn Hyphenator>>) {
        self.hyphenator = hyphenator;
        self.invalidate_all();
    }

    /// The shared format pool.
    pub fn formats(&self) -> &FormatCollection {
        &self.formats
    }

    /// The formatter settings in effect.
    pub fn settings(&self) -> &FormatterSettings {
        &self.settings
    }

    /// Replaces the formatter settings and invalidates every paragraph.
    pub fn set_settings(&mut self, settings: FormatterSettings) {
        self.settings = settings;
        self.invalidate_all();
    }
}

impl CounterChain for Document {
    fn previous(&self, id: ParagraphId) -> Option<ParagraphId> {
        self.prev(id)
    }

    fn counter(&self, id: ParagraphId) -> Option<&ParagraphCounter> {
        self.get(id)?.layout.counter.as_ref()
    }

    fn counter_mut(&mut self, id: ParagraphId) -> Option<&mut ParagraphCounter> {
        paragraph_mut(&mut self.slots, id)?.layout.counter.as_mut()
    }

    fn is_right_to_left(&self, id: ParagraphId) -> bool {
        self.get(id).is_some_and(|p| p.run.is_right_to_left())
    }

    fn is_only_paragraph(&self, id: ParagraphId) -> bool {
        self.count == 1 && self.get(id).is_some()
    }
}

fn paragraph_mut(slots: &mut [Slot], id: ParagraphId) -> Option<&mut Paragraph> {
    let slot = slots.get_mut(id.index())?;
    if slot.generation != id.generation() {
        return None;
    }
    slot.paragraph.as_mut()
}

/// Drops a counter without numbering unless the paragraph is an outline entry.
fn collect_counter(mut layout: ParagraphLayout) -> ParagraphLayout {
    let unnumbered = layout
        .counter
        .as_ref()
        .is_some_and(|counter| counter.numbering() == counter::Numbering::None);
    if unnumbered && !layout.outline {
        layout.counter = None;
    }
    layout
}
