// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between counters and persisted list-level attributes.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::{CounterAlignment, CounterStyle, Numbering, ParagraphCounter};

/// The kind of list a list level belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ListKind {
    /// A numbered list.
    Ordered,
    /// A bulleted list.
    Bullet,
    /// Heading numbering.
    Heading,
}

fn style_from_num_format(format: &str) -> CounterStyle {
    match format.chars().next() {
        Some('1') => CounterStyle::Arabic,
        Some('a') => CounterStyle::LowerAlpha,
        Some('A') => CounterStyle::UpperAlpha,
        Some('i') => CounterStyle::LowerRoman,
        Some('I') => CounterStyle::UpperRoman,
        _ => CounterStyle::None,
    }
}

fn num_format(style: CounterStyle) -> &'static str {
    match style {
        CounterStyle::Arabic => "1",
        CounterStyle::LowerAlpha => "a",
        CounterStyle::UpperAlpha => "A",
        CounterStyle::LowerRoman => "i",
        CounterStyle::UpperRoman => "I",
        _ => "",
    }
}

fn style_from_bullet(bullet: char) -> Option<CounterStyle> {
    match bullet {
        '\u{2022}' => Some(CounterStyle::CircleBullet),
        '\u{25CF}' | '\u{F0B7}' => Some(CounterStyle::DiscBullet),
        '\u{25A0}' | '\u{E00A}' => Some(CounterStyle::SquareBullet),
        '\u{27A2}' | '\u{E00C}' => Some(CounterStyle::BoxBullet),
        _ => None,
    }
}

fn alignment_from_attribute(value: &str) -> CounterAlignment {
    match value {
        "end" | "right" => CounterAlignment::Right,
        "left" => CounterAlignment::Left,
        _ => CounterAlignment::Auto,
    }
}

impl ParagraphCounter {
    /// Builds a counter from the attributes of a persisted list level.
    ///
    /// `restart_numbering` is the start value given on the paragraph itself, if
    /// any. Styles carry a start value without restarting the sequence, so
    /// `loading_style` suppresses the restart flag. Unknown formats give
    /// [`CounterStyle::None`] and unparseable numbers fall back to 1.
    pub fn load_list_level<'a>(
        kind: ListKind,
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
        restart_numbering: Option<u32>,
        loading_style: bool,
    ) -> Self {
        let mut counter = Self::new(
            if kind == ListKind::Heading {
                Numbering::Chapter
            } else {
                Numbering::List
            },
            CounterStyle::None,
        );
        let mut start_value = restart_numbering;
        let mut style_start_value = None;
        let mut bullet_char = None;
        let mut num_format = None;
        for (name, value) in attributes {
            match name {
                "text:level" => {
                    counter.depth = value.trim().parse::<u32>().unwrap_or(1).max(1) - 1;
                }
                "style:num-prefix" => counter.prefix = value.to_string(),
                "style:num-suffix" => counter.suffix = value.to_string(),
                "style:num-format" => num_format = Some(value),
                "text:display-levels" => {
                    counter.display_levels = value.trim().parse().unwrap_or(1);
                }
                "text:bullet-char" => bullet_char = value.chars().next(),
                "text:start-value" => {
                    style_start_value = Some(value.trim().parse().unwrap_or(1));
                }
                "style:font-name" | "fo:font-family" => {
                    counter.custom_bullet_font = Some(value.to_string());
                }
                "fo:text-align" => counter.alignment = alignment_from_attribute(value),
                _ => log::debug!("ignoring list level attribute {name}"),
            }
        }
        if start_value.is_none() {
            start_value = style_start_value;
        }
        counter.restart = !loading_style && start_value.is_some();
        counter.start_number = start_value.unwrap_or(1);

        if kind == ListKind::Bullet {
            counter.style = match bullet_char.map(|c| (c, style_from_bullet(c))) {
                Some((_, Some(style))) => style,
                Some((c, None)) => {
                    counter.custom_bullet = c;
                    CounterStyle::CustomBullet
                }
                None => CounterStyle::DiscBullet,
            };
        } else {
            counter.style = num_format.map_or(CounterStyle::None, style_from_num_format);
        }
        counter.display_levels = counter.display_levels.clamp(1, counter.depth + 1);
        counter
    }

    /// Returns the persisted attributes of this counter's list level.
    pub fn save_list_level(&self, saving_style: bool) -> Vec<(&'static str, String)> {
        let mut attributes = Vec::new();
        attributes.push(("text:level", (self.depth + 1).to_string()));
        if self.is_bullet() {
            let bullet = self.style.bullet_char().unwrap_or(self.custom_bullet);
            attributes.push(("text:bullet-char", bullet.to_string()));
            if let Some(font) = &self.custom_bullet_font {
                attributes.push(("style:font-name", font.clone()));
            }
        } else {
            attributes.push(("text:display-levels", self.display_levels.to_string()));
            if self.style != CounterStyle::Custom {
                attributes.push(("style:num-format", num_format(self.style).to_string()));
            }
            if saving_style && self.restart {
                attributes.push(("text:start-value", self.start_number.to_string()));
            }
        }
        attributes.push(("style:num-prefix", self.prefix.clone()));
        attributes.push(("style:num-suffix", self.suffix.clone()));
        let align = match self.alignment {
            CounterAlignment::Auto => "start",
            CounterAlignment::Left => "left",
            CounterAlignment::Right => "end",
        };
        attributes.push(("fo:text-align", align.to_string()));
        attributes
    }
}
