// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Error type for document mutations and hyphenation lookups.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the index, range or language
/// the caller supplied, so the message can say what was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The first index supplied by the caller, if any.
    start: usize,

    /// The end index (exclusive) supplied by the caller, if any.
    end: usize,

    /// The length of the character run at the time of failure.
    len: usize,

    /// Language tag or pattern text for hyphenation failures.
    detail: Option<String>,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports the run length as context; an `is_empty` method would be meaningless."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The first index provided by the caller.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end index provided by the caller.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length of the character run when the error occurred.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The language tag or pattern involved in a hyphenation error.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub(crate) fn invalid_index(index: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidIndex,
            start: index,
            end: index,
            len,
            detail: None,
        }
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            start,
            end,
            len,
            detail: None,
        }
    }

    pub(crate) fn unknown_paragraph(index: usize) -> Self {
        Self {
            kind: ErrorKind::UnknownParagraph,
            start: index,
            end: index,
            len: 0,
            detail: None,
        }
    }

    pub(crate) fn missing_dictionary(language: &str) -> Self {
        Self {
            kind: ErrorKind::MissingDictionary,
            start: 0,
            end: 0,
            len: 0,
            detail: Some(language.into()),
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str) -> Self {
        Self {
            kind: ErrorKind::InvalidPattern,
            start: 0,
            end: 0,
            len: 0,
            detail: Some(pattern.into()),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidIndex => write!(
                f,
                "character index {} out of bounds for run of len {}",
                self.start, self.len
            ),
            ErrorKind::InvalidRange => write!(
                f,
                "invalid range {}..{} for run of len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::UnknownParagraph => {
                write!(f, "paragraph handle {} is not part of this document", self.start)
            }
            ErrorKind::MissingDictionary => write!(
                f,
                "no hyphenation patterns for language `{}`",
                self.detail.as_deref().unwrap_or_default()
            ),
            ErrorKind::InvalidPattern => write!(
                f,
                "malformed hyphenation pattern `{}`",
                self.detail.as_deref().unwrap_or_default()
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A character index was past the end of the run.
    InvalidIndex,

    /// A range had `start > end` or extended past the run.
    InvalidRange,

    /// A paragraph handle was stale or belonged to another document.
    UnknownParagraph,

    /// No hyphenation patterns are loaded for the requested language.
    MissingDictionary,

    /// A hyphenation pattern could not be parsed.
    InvalidPattern,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_mentions_bounds() {
        let err = Error::invalid_range(4, 2, 10);
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(
            err.to_string(),
            "invalid range 4..2 for run of len 10",
            "range errors should report both ends and the run length"
        );
    }

    #[test]
    fn display_mentions_language() {
        let err = Error::missing_dictionary("nl");
        assert_eq!(err.detail(), Some("nl"));
        assert!(err.to_string().contains("`nl`"), "message should name the language");
    }
}
