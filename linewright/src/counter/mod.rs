// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph numbering and bullets.
//!
//! A [`ParagraphCounter`] only stores how a paragraph is numbered. Its number and
//! label depend on the paragraphs before it, so they are computed by the free
//! functions in this module against a [`CounterChain`] and memoized in the
//! counter until [`ParagraphCounter::invalidate`] is called.

mod attributes;
pub mod numerals;

pub use attributes::ListKind;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::metrics::FontMetrics;
use crate::paragraph::ParagraphId;
use crate::style::{TextFormat, VerticalAlign};
use crate::units::ZoomHandler;

/// What kind of sequence a counter belongs to.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum Numbering {
    /// No numbering. Kept only to preserve the depth of outline paragraphs.
    #[default]
    None,
    /// A list item; restarts after any heading.
    List,
    /// A heading; numbered across the whole document.
    Chapter,
    /// A fixed label that never looks at other paragraphs.
    Footnote,
}

/// How the label of a counter is rendered.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum CounterStyle {
    /// No label.
    None,
    /// `1, 2, 3`.
    #[default]
    Arabic,
    /// `a, b, c`.
    LowerAlpha,
    /// `A, B, C`.
    UpperAlpha,
    /// `i, ii, iii`.
    LowerRoman,
    /// `I, II, III`.
    UpperRoman,
    /// The counter's custom text.
    Custom,
    /// The counter's custom bullet character.
    CustomBullet,
    /// Small disc bullet.
    CircleBullet,
    /// Square bullet.
    SquareBullet,
    /// Large disc bullet.
    DiscBullet,
    /// Arrowhead bullet.
    BoxBullet,
}

impl CounterStyle {
    /// Whether this style draws a glyph instead of a number.
    pub fn is_bullet(self) -> bool {
        matches!(
            self,
            Self::CustomBullet
                | Self::CircleBullet
                | Self::SquareBullet
                | Self::DiscBullet
                | Self::BoxBullet
        )
    }

    /// The glyph drawn by a predefined bullet style.
    pub fn bullet_char(self) -> Option<char> {
        match self {
            Self::CircleBullet => Some('\u{2022}'),
            Self::DiscBullet => Some('\u{25CF}'),
            Self::SquareBullet => Some('\u{25A0}'),
            Self::BoxBullet => Some('\u{27A2}'),
            _ => None,
        }
    }
}

/// Horizontal alignment of the label within its box.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum CounterAlignment {
    /// Follows the paragraph direction.
    Auto,
    /// Left aligned.
    #[default]
    Left,
    /// Right aligned.
    Right,
}

#[derive(Clone, Debug, Default)]
struct CounterCache {
    number: Option<u32>,
    parent: Option<Option<ParagraphId>>,
    text: Option<String>,
    /// Width in layout units, with the key of the format it was measured in.
    width: Option<(i32, String)>,
}

/// Numbering or bullet attached to a paragraph.
#[derive(Clone, Debug)]
pub struct ParagraphCounter {
    numbering: Numbering,
    style: CounterStyle,
    depth: u32,
    start_number: u32,
    display_levels: u32,
    prefix: String,
    suffix: String,
    restart: bool,
    custom_bullet: char,
    custom_bullet_font: Option<String>,
    custom: String,
    alignment: CounterAlignment,
    cache: CounterCache,
}

impl Default for ParagraphCounter {
    fn default() -> Self {
        Self::new(Numbering::None, CounterStyle::None)
    }
}

/// Compares configuration only; cached values are ignored.
impl PartialEq for ParagraphCounter {
    fn eq(&self, other: &Self) -> bool {
        self.numbering == other.numbering
            && self.style == other.style
            && self.depth == other.depth
            && self.start_number == other.start_number
            && self.display_levels == other.display_levels
            && self.prefix == other.prefix
            && self.suffix == other.suffix
            && self.restart == other.restart
            && self.custom_bullet == other.custom_bullet
            && self.custom_bullet_font == other.custom_bullet_font
            && self.custom == other.custom
            && self.alignment == other.alignment
    }
}

macro_rules! setter {
    ($(#[$doc:meta])* $name:ident, $field:ident: $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: $ty) {
            self.$field = value;
            self.invalidate();
        }
    };
}

impl ParagraphCounter {
    /// Creates a top-level counter starting at 1 and showing one level.
    pub fn new(numbering: Numbering, style: CounterStyle) -> Self {
        Self {
            numbering,
            style,
            depth: 0,
            start_number: 1,
            display_levels: 1,
            prefix: String::new(),
            suffix: String::new(),
            restart: false,
            custom_bullet: '-',
            custom_bullet_font: None,
            custom: String::new(),
            alignment: CounterAlignment::Left,
            cache: CounterCache::default(),
        }
    }

    /// Numbering kind.
    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    /// Label style.
    pub fn style(&self) -> CounterStyle {
        self.style
    }

    /// Nesting level, zero based.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// First number of the sequence.
    pub fn start_number(&self) -> u32 {
        self.start_number
    }

    /// Number of levels shown in the label, including this one.
    pub fn display_levels(&self) -> u32 {
        self.display_levels
    }

    /// Text before the label.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text after the label.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether this paragraph restarts the sequence at the start number.
    pub fn restart(&self) -> bool {
        self.restart
    }

    /// Glyph of a [`CounterStyle::CustomBullet`].
    pub fn custom_bullet(&self) -> char {
        self.custom_bullet
    }

    /// Font family of the custom bullet glyph.
    pub fn custom_bullet_font(&self) -> Option<&str> {
        self.custom_bullet_font.as_deref()
    }

    /// Text of a [`CounterStyle::Custom`] label.
    pub fn custom(&self) -> &str {
        &self.custom
    }

    /// Label alignment.
    pub fn alignment(&self) -> CounterAlignment {
        self.alignment
    }

    /// Whether the label is a bullet glyph.
    pub fn is_bullet(&self) -> bool {
        self.style.is_bullet()
    }

    setter!(
        /// Sets the numbering kind.
        set_numbering, numbering: Numbering
    );
    setter!(
        /// Sets the label style.
        set_style, style: CounterStyle
    );
    setter!(
        /// Sets the nesting level.
        set_depth, depth: u32
    );
    setter!(
        /// Sets the first number of the sequence.
        set_start_number, start_number: u32
    );
    setter!(
        /// Sets how many levels the label shows.
        set_display_levels, display_levels: u32
    );
    setter!(
        /// Sets the text before the label.
        set_prefix, prefix: String
    );
    setter!(
        /// Sets the text after the label.
        set_suffix, suffix: String
    );
    setter!(
        /// Makes this paragraph restart the sequence.
        set_restart, restart: bool
    );
    setter!(
        /// Sets the custom bullet glyph.
        set_custom_bullet, custom_bullet: char
    );
    setter!(
        /// Sets the custom bullet font family.
        set_custom_bullet_font, custom_bullet_font: Option<String>
    );
    setter!(
        /// Sets the text of a custom label.
        set_custom, custom: String
    );
    setter!(
        /// Sets the label alignment.
        set_alignment, alignment: CounterAlignment
    );

    /// Clears every cached value.
    pub fn invalidate(&mut self) {
        self.cache = CounterCache::default();
    }

    /// The cached number, if computed.
    pub fn cached_number(&self) -> Option<u32> {
        self.cache.number
    }

    /// Whether a finished label ends with `.` when no suffix is set.
    fn has_number_separator(&self) -> bool {
        matches!(
            self.style,
            CounterStyle::Arabic
                | CounterStyle::LowerAlpha
                | CounterStyle::UpperAlpha
                | CounterStyle::LowerRoman
                | CounterStyle::UpperRoman
        )
    }
}

/// Access to the paragraphs a counter depends on.
pub trait CounterChain {
    /// The paragraph before `id`.
    fn previous(&self, id: ParagraphId) -> Option<ParagraphId>;

    /// The counter of `id`.
    fn counter(&self, id: ParagraphId) -> Option<&ParagraphCounter>;

    /// The counter of `id`, for cache updates.
    fn counter_mut(&mut self, id: ParagraphId) -> Option<&mut ParagraphCounter>;

    /// Whether `id` is laid out right to left.
    fn is_right_to_left(&self, id: ParagraphId) -> bool;

    /// Whether `id` is the only paragraph of its document.
    fn is_only_paragraph(&self, id: ParagraphId) -> bool;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NumberSource {
    /// The number is known without looking further back.
    Fixed(u32),
    /// One more than the number of this paragraph.
    After(ParagraphId),
}

/// Finds what the number of `id` is derived from. Pure.
fn number_source<C: CounterChain + ?Sized>(chain: &C, id: ParagraphId) -> Option<NumberSource> {
    let counter = chain.counter(id)?;
    if counter.restart {
        return Some(NumberSource::Fixed(counter.start_number));
    }
    let start = NumberSource::Fixed(counter.start_number);
    match counter.numbering {
        Numbering::None => Some(NumberSource::Fixed(0)),
        Numbering::Footnote => Some(start),
        Numbering::Chapter => {
            let mut other = chain.previous(id);
            while let Some(p) = other {
                if let Some(c) = chain.counter(p) {
                    if c.numbering == Numbering::Chapter && c.depth <= counter.depth {
                        if c.depth == counter.depth && c.style == counter.style {
                            return Some(NumberSource::After(p));
                        }
                        // A higher-level heading starts a new sequence.
                        return Some(start);
                    }
                }
                other = chain.previous(p);
            }
            Some(start)
        }
        Numbering::List => {
            let mut other = chain.previous(id);
            while let Some(p) = other {
                if let Some(c) = chain.counter(p) {
                    if c.numbering == Numbering::List && !c.is_bullet() && c.depth <= counter.depth
                    {
                        if c.depth == counter.depth && c.style == counter.style {
                            return Some(NumberSource::After(p));
                        }
                        return Some(start);
                    } else if c.numbering == Numbering::Chapter {
                        // Headings reset list numbering.
                        return Some(start);
                    }
                }
                other = chain.previous(p);
            }
            Some(start)
        }
    }
}

/// The number of paragraph `id`, or `None` if it has no counter.
///
/// Walks backwards until a paragraph with a known number is found, then fills
/// the caches of every paragraph on the way.
pub fn number<C: CounterChain + ?Sized>(chain: &mut C, id: ParagraphId) -> Option<u32> {
    let mut pending = Vec::new();
    let mut current = id;
    let mut value = loop {
        if let Some(n) = chain.counter(current)?.cache.number {
            break n;
        }
        match number_source(chain, current)? {
            NumberSource::Fixed(n) => {
                if let Some(counter) = chain.counter_mut(current) {
                    counter.cache.number = Some(n);
                }
                break n;
            }
            NumberSource::After(previous) => {
                pending.push(current);
                current = previous;
            }
        }
    };
    while let Some(p) = pending.pop() {
        value += 1;
        if let Some(counter) = chain.counter_mut(p) {
            counter.cache.number = Some(value);
        }
    }
    log::trace!("counter number of {id:?} is {value}");
    Some(value)
}

/// The nearest preceding paragraph at a strictly lower depth of the same kind.
pub fn parent<C: CounterChain + ?Sized>(chain: &mut C, id: ParagraphId) -> Option<ParagraphId> {
    let counter = chain.counter(id)?;
    if let Some(parent) = counter.cache.parent {
        return parent;
    }
    let found = find_parent(chain, id, counter);
    if let Some(counter) = chain.counter_mut(id) {
        counter.cache.parent = Some(found);
    }
    found
}

fn find_parent<C: CounterChain + ?Sized>(
    chain: &C,
    id: ParagraphId,
    counter: &ParagraphCounter,
) -> Option<ParagraphId> {
    let mut other = chain.previous(id);
    match counter.numbering {
        Numbering::None | Numbering::Footnote => None,
        Numbering::Chapter => {
            while let Some(p) = other {
                if let Some(c) = chain.counter(p) {
                    if c.numbering == Numbering::Chapter && c.depth < counter.depth {
                        return Some(p);
                    }
                }
                other = chain.previous(p);
            }
            None
        }
        Numbering::List => {
            while let Some(p) = other {
                if let Some(c) = chain.counter(p) {
                    if c.numbering == Numbering::List && !c.is_bullet() && c.depth < counter.depth {
                        return Some(p);
                    } else if c.numbering == Numbering::Chapter {
                        return None;
                    }
                }
                other = chain.previous(p);
            }
            None
        }
    }
}

/// The label of this level only: a number, letters, numerals or a bullet glyph.
pub fn level_text<C: CounterChain + ?Sized>(chain: &mut C, id: ParagraphId) -> String {
    let Some(counter) = chain.counter(id) else {
        return String::new();
    };
    if counter.numbering == Numbering::None {
        return String::new();
    }
    let style = counter.style;
    let numbering = counter.numbering;
    // Chapters are never bulleted.
    if style.is_bullet() && numbering != Numbering::Chapter {
        return match style {
            CounterStyle::CustomBullet => counter.custom_bullet.to_string(),
            other => other.bullet_char().map(String::from).unwrap_or_default(),
        };
    }
    let custom = counter.custom.clone();
    let n = number(chain, id).unwrap_or(0);
    let converted = match style {
        CounterStyle::None => {
            return if numbering == Numbering::List {
                String::from(" ")
            } else {
                String::new()
            };
        }
        CounterStyle::LowerAlpha => numerals::to_alpha_lower(n),
        CounterStyle::UpperAlpha => numerals::to_alpha_upper(n),
        CounterStyle::LowerRoman => numerals::to_roman_lower(n),
        CounterStyle::UpperRoman => numerals::to_roman_upper(n),
        CounterStyle::Custom if !custom.is_empty() => Some(custom),
        _ => None,
    };
    // Values a style cannot represent fall back to decimal.
    converted.unwrap_or_else(|| n.to_string())
}

/// The complete label, including ancestor levels, prefix, suffix and the
/// trailing space that separates it from the text.
///
/// Numeric and alphabetic styles always close with something: an empty
/// suffix gives `.`, so the first arabic list item reads `1. `. A label
/// without any closing character cannot be produced; set a suffix such as
/// `)` to replace the dot. Bullets and custom labels get no dot.
pub fn text<C: CounterChain + ?Sized>(chain: &mut C, id: ParagraphId) -> String {
    let Some(counter) = chain.counter(id) else {
        return String::new();
    };
    if let Some(text) = &counter.cache.text {
        return text.clone();
    }
    let numbering = counter.numbering;
    if numbering == Numbering::None {
        return String::new();
    }
    let depth = counter.depth;
    let display_levels = counter.display_levels.min(depth + 1);
    let prefix = counter.prefix.clone();
    let suffix = counter.suffix.clone();
    let separator = counter.has_number_separator();

    let mut body = String::new();
    if display_levels > 1 {
        let mut ancestor = parent(chain, id);
        let mut level = 1;
        while level < display_levels {
            if let Some(p) = ancestor {
                let ancestor_depth = chain.counter(p).map_or(0, |c| c.depth);
                let is_bullet = chain.counter(p).is_some_and(ParagraphCounter::is_bullet);
                let mut part = level_text(chain, p);
                if is_bullet {
                    part = part.chars().map(|_| ' ').collect();
                }
                part.push('.');
                let missing = depth.saturating_sub(level + ancestor_depth);
                level += missing;
                for _ in 0..missing {
                    part.push_str("0.");
                }
                body.insert_str(0, &part);
                if level < display_levels {
                    ancestor = parent(chain, p);
                }
            } else if chain.is_only_paragraph(id) {
                body.insert_str(0, "1.");
            } else {
                body.insert_str(0, "0.");
            }
            level += 1;
        }
    }
    body.push_str(&level_text(chain, id));

    let closing = if suffix.is_empty() && separator {
        String::from(".")
    } else {
        suffix
    };
    let mut text = if chain.is_right_to_left(id) {
        closing + &body + &prefix
    } else {
        prefix + &body + &closing
    };
    if !text.is_empty() {
        text.push(' ');
    }
    if let Some(counter) = chain.counter_mut(id) {
        counter.cache.text = Some(text.clone());
    }
    text
}

/// Width of the label in layout units, measured in `format`.
///
/// `format` is normally the format of the paragraph's first character. Labels
/// of style [`CounterStyle::None`] take no space unless they are footnotes.
pub fn width<C: CounterChain + ?Sized>(
    chain: &mut C,
    id: ParagraphId,
    format: &TextFormat,
    metrics: &dyn FontMetrics,
    zoom: &ZoomHandler,
) -> i32 {
    let format = counter_format(format);
    let key = format.key();
    let Some(counter) = chain.counter(id) else {
        return 0;
    };
    if let Some((width, cached_key)) = &counter.cache.width {
        if *cached_key == key {
            return *width;
        }
    }
    let style = counter.style;
    let numbering = counter.numbering;
    let bullet_font = counter.custom_bullet_font.clone();
    let custom_bullet = counter.custom_bullet;

    let mut points = 0.;
    if style != CounterStyle::None || numbering == Numbering::Footnote {
        let mut label = text(chain, id);
        if style == CounterStyle::CustomBullet && !label.is_empty() {
            label.push(' ');
        }
        let bullet_format = bullet_font.map(|family| TextFormat {
            family,
            ..format.clone()
        });
        for ch in label.chars() {
            let measure_in = match &bullet_format {
                Some(bullet) if style == CounterStyle::CustomBullet && ch == custom_bullet => bullet,
                _ => &format,
            };
            points += metrics.advance(measure_in, ch);
        }
    }
    let width = crate::util::round_to_i32(zoom.pt_to_layout_unit_pt(points));
    if let Some(counter) = chain.counter_mut(id) {
        counter.cache.width = Some((width, key));
    }
    width
}

/// Offset of the label glyphs from the start of the label box, in layout units.
pub fn bullet_x<C: CounterChain + ?Sized>(
    chain: &C,
    id: ParagraphId,
    format: &TextFormat,
    metrics: &dyn FontMetrics,
    zoom: &ZoomHandler,
) -> i32 {
    let Some(counter) = chain.counter(id) else {
        return 0;
    };
    let format = counter_format(format);
    let points: f64 = counter
        .prefix
        .chars()
        .map(|ch| metrics.advance(&format, ch))
        .sum();
    crate::util::round_to_i32(zoom.pt_to_layout_unit_pt(points))
}

/// Labels are never raised or lowered with the first character.
fn counter_format(format: &TextFormat) -> TextFormat {
    TextFormat {
        vertical_align: VerticalAlign::Normal,
        ..format.clone()
    }
}
