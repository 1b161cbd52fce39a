// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::counter::{CounterStyle, Numbering, ParagraphCounter};
use crate::{Document, DocumentConfig, FixedMetrics, ParagraphId, ParagraphLayout};

/// Characters are 30 layout units wide; lines are 240 units high.
pub(crate) const METRICS: FixedMetrics = FixedMetrics {
    advance: 1.5,
    ascent: 10.,
    descent: 2.,
};

/// A document whose frame holds eight characters per line.
pub(crate) fn narrow_document(text: &str) -> Document {
    let mut doc = Document::new(DocumentConfig {
        width: 250,
        ..DocumentConfig::default()
    });
    doc.set_plain_text(text);
    doc
}

pub(crate) fn ids(doc: &Document) -> Vec<ParagraphId> {
    doc.iter().map(|(id, _)| id).collect()
}

pub(crate) fn list_layout(depth: u32) -> ParagraphLayout {
    let mut counter = ParagraphCounter::new(Numbering::List, CounterStyle::Arabic);
    counter.set_depth(depth);
    ParagraphLayout {
        counter: Some(counter),
        ..ParagraphLayout::default()
    }
}

pub(crate) fn chapter_layout(depth: u32) -> ParagraphLayout {
    let mut counter = ParagraphCounter::new(Numbering::Chapter, CounterStyle::Arabic);
    counter.set_depth(depth);
    ParagraphLayout {
        counter: Some(counter),
        ..ParagraphLayout::default()
    }
}
