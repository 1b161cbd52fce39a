// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interning pool for character formats.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use hashbrown::HashMap;

use super::TextFormat;

/// Shared handle to an interned [`TextFormat`].
pub type FormatRef = Rc<TextFormat>;

/// De-duplicating pool of character formats, keyed by [`TextFormat::key`].
///
/// The pool holds weak references only: a format lives as long as some
/// character (or the caller) holds its [`FormatRef`]. Dead entries are reused on
/// lookup and dropped by [`purge`](Self::purge).
#[derive(Debug)]
pub struct FormatCollection {
    formats: HashMap<String, Weak<TextFormat>>,
    default_format: FormatRef,
}

impl Default for FormatCollection {
    fn default() -> Self {
        Self::new(TextFormat::default())
    }
}

impl FormatCollection {
    /// Creates a pool whose default format is `default_format`.
    pub fn new(default_format: TextFormat) -> Self {
        let mut formats = HashMap::new();
        let key = default_format.key();
        let default_format = Rc::new(default_format);
        formats.insert(key, Rc::downgrade(&default_format));
        Self {
            formats,
            default_format,
        }
    }

    /// The format used for new paragraphs and the end-of-paragraph anchor.
    pub fn default_format(&self) -> FormatRef {
        self.default_format.clone()
    }

    /// Returns the canonical shared instance for `candidate`, interning it if needed.
    pub fn format(&mut self, candidate: &TextFormat) -> FormatRef {
        let key = candidate.key();
        if let Some(existing) = self.formats.get(&key).and_then(Weak::upgrade) {
            return existing;
        }
        let format = Rc::new(candidate.clone());
        self.formats.insert(key, Rc::downgrade(&format));
        format
    }

    /// Looks up the live instance for `key` without creating one.
    pub fn get(&self, key: &str) -> Option<FormatRef> {
        self.formats.get(key).and_then(Weak::upgrade)
    }

    /// Number of live formats in the pool.
    pub fn len(&self) -> usize {
        self.formats
            .values()
            .filter(|format| format.strong_count() > 0)
            .count()
    }

    /// Returns `true` if no format is alive. Never the case while the pool exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops entries whose formats are no longer referenced.
    pub fn purge(&mut self) {
        self.formats.retain(|_, format| format.strong_count() > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::UnderlineStyle;

    #[test]
    fn interning_returns_shared_instance() {
        let mut pool = FormatCollection::default();
        let bold = TextFormat {
            weight: 700,
            ..TextFormat::default()
        };
        let a = pool.format(&bold);
        let b = pool.format(&bold.clone());
        assert!(Rc::ptr_eq(&a, &b), "equal candidates must share one instance");
        assert_eq!(pool.len(), 2, "default plus bold");
    }

    #[test]
    fn default_candidate_maps_to_default_format() {
        let mut pool = FormatCollection::default();
        let f = pool.format(&TextFormat::default());
        assert!(Rc::ptr_eq(&f, &pool.default_format()));
    }

    #[test]
    fn dead_formats_are_reclaimed() {
        let mut pool = FormatCollection::default();
        let underlined = TextFormat {
            underline: UnderlineStyle::Wave,
            ..TextFormat::default()
        };
        let handle = pool.format(&underlined);
        let key = underlined.key();
        assert!(pool.get(&key).is_some());
        drop(handle);
        assert!(pool.get(&key).is_none(), "last handle dropped");
        assert_eq!(pool.len(), 1);
        pool.purge();
        assert_eq!(pool.formats.len(), 1, "purge removes the dead entry");
        let again = pool.format(&underlined);
        assert_eq!(again.underline, UnderlineStyle::Wave);
    }
}
