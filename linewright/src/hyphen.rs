// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hyphenation opportunities.
//!
//! The formatter asks a [`Hyphenator`] where a word may be split. Any error,
//! such as a language without patterns, is treated as "no opportunities".

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::Error;

/// Permitted hyphenation points of one word.
///
/// Entry `i` is the priority of breaking after character `i`; odd priorities
/// permit a break.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HyphenationPoints {
    levels: SmallVec<[u8; 32]>,
}

impl HyphenationPoints {
    /// No opportunities in a word of `len` characters.
    pub fn none(len: usize) -> Self {
        Self {
            levels: smallvec::smallvec![0; len],
        }
    }

    /// Opportunities after each character index in `positions`.
    pub fn from_positions(len: usize, positions: impl IntoIterator<Item = usize>) -> Self {
        let mut points = Self::none(len);
        for pos in positions {
            if let Some(level) = points.levels.get_mut(pos) {
                *level = 1;
            }
        }
        points
    }

    /// Whether the word may be hyphenated after character `index`.
    pub fn can_break_after(&self, index: usize) -> bool {
        self.levels.get(index).is_some_and(|level| level & 1 == 1)
    }

    /// Indices after which the word may be hyphenated.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, level)| *level & 1 == 1)
            .map(|(i, _)| i)
    }
}

/// Finds hyphenation points in words.
pub trait Hyphenator {
    /// Returns the hyphenation points of `word` in `language`.
    ///
    /// `word` contains no whitespace. Errors are reported for missing
    /// dictionaries; the formatter then does not hyphenate.
    fn hyphenate(&self, word: &str, language: &str) -> Result<HyphenationPoints, Error>;
}

#[derive(Clone, Debug, Default)]
struct PatternSet {
    patterns: HashMap<String, SmallVec<[u8; 8]>>,
    exceptions: HashMap<String, HyphenationPoints>,
    max_len: usize,
}

/// Liang's pattern-based hyphenation, with patterns supplied per language.
///
/// Patterns use the TeX notation: letters interleaved with digits giving the
/// priority of a break at that point, and `.` marking a word boundary, e.g.
/// `hy3ph` or `.ex5`.
#[derive(Clone, Debug)]
pub struct PatternHyphenator {
    languages: HashMap<String, PatternSet>,
    /// Minimum number of characters before the first hyphen.
    pub min_prefix: usize,
    /// Minimum number of characters after the last hyphen.
    pub min_suffix: usize,
}

impl Default for PatternHyphenator {
    fn default() -> Self {
        Self {
            languages: HashMap::new(),
            min_prefix: 2,
            min_suffix: 2,
        }
    }
}

impl PatternHyphenator {
    /// Creates a hyphenator without any languages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds whitespace-separated `patterns` for `language`.
    pub fn add_patterns(&mut self, language: &str, patterns: &str) -> Result<(), Error> {
        let set = self.languages.entry(normalize_language(language)).or_default();
        for pattern in patterns.split_whitespace() {
            let (letters, values) = parse_pattern(pattern)?;
            set.max_len = set.max_len.max(letters.chars().count());
            set.patterns.insert(letters, values);
        }
        Ok(())
    }

    /// Adds an exception word spelled with explicit hyphens, e.g. `ta-ble`.
    pub fn add_exception(&mut self, language: &str, hyphenated: &str) {
        let set = self.languages.entry(normalize_language(language)).or_default();
        let mut word = String::new();
        let mut positions = Vec::new();
        for c in hyphenated.chars() {
            if c == '-' {
                if let Some(last) = word.chars().count().checked_sub(1) {
                    positions.push(last);
                }
            } else {
                word.extend(c.to_lowercase());
            }
        }
        let len = word.chars().count();
        set.exceptions
            .insert(word, HyphenationPoints::from_positions(len, positions));
    }

    /// Whether patterns are loaded for `language`.
    pub fn has_language(&self, language: &str) -> bool {
        self.lookup(language).is_some()
    }

    fn lookup(&self, language: &str) -> Option<&PatternSet> {
        let normalized = normalize_language(language);
        self.languages.get(&normalized).or_else(|| {
            let primary = normalized.split('-').next()?;
            self.languages.get(primary)
        })
    }
}

impl Hyphenator for PatternHyphenator {
    fn hyphenate(&self, word: &str, language: &str) -> Result<HyphenationPoints, Error> {
        let set = self
            .lookup(language)
            .ok_or_else(|| Error::missing_dictionary(language))?;
        let lower: String = word.chars().flat_map(char::to_lowercase).collect();
        let len = word.chars().count();
        if lower.chars().count() != len {
            // Case mapping changed the length; positions would not line up.
            return Ok(HyphenationPoints::none(len));
        }
        if let Some(points) = set.exceptions.get(&lower) {
            return Ok(points.clone());
        }

        let mut chars: Vec<char> = Vec::with_capacity(len + 2);
        chars.push('.');
        chars.extend(lower.chars());
        chars.push('.');
        let mut values: Vec<u8> = vec![0; chars.len() + 1];
        let mut key = String::new();
        for start in 0..chars.len() {
            let end_max = chars.len().min(start + set.max_len);
            for end in start + 1..=end_max {
                key.clear();
                key.extend(&chars[start..end]);
                if let Some(pattern) = set.patterns.get(&key) {
                    for (offset, &value) in pattern.iter().enumerate() {
                        let slot = &mut values[start + offset];
                        *slot = (*slot).max(value);
                    }
                }
            }
        }

        // values[k] sits between chars[k - 1] and chars[k]; chars[0] is the boundary.
        let mut points = HyphenationPoints::none(len);
        for (i, level) in points.levels.iter_mut().enumerate() {
            let before = i + 1;
            let after = len - before;
            if before >= self.min_prefix && after >= self.min_suffix {
                *level = values[i + 2];
            }
        }
        Ok(points)
    }
}

fn normalize_language(language: &str) -> String {
    language.replace('_', "-").to_ascii_lowercase()
}

fn parse_pattern(pattern: &str) -> Result<(String, SmallVec<[u8; 8]>), Error> {
    let mut letters = String::new();
    let mut values: SmallVec<[u8; 8]> = SmallVec::new();
    let mut pending: Option<u8> = None;
    for c in pattern.chars() {
        if let Some(digit) = c.to_digit(10) {
            if pending.is_some() {
                return Err(Error::invalid_pattern(pattern));
            }
            pending = u8::try_from(digit).ok();
        } else {
            values.push(pending.take().unwrap_or(0));
            letters.extend(c.to_lowercase());
        }
    }
    if letters.is_empty() {
        return Err(Error::invalid_pattern(pattern));
    }
    values.push(pending.unwrap_or(0));
    Ok((letters, values))
}
