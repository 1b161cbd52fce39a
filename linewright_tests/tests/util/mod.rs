// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use linewright::{Document, DocumentConfig, FixedMetrics, ParagraphId};

/// Every character is 1.5pt (30 layout units) wide, every line 12pt
/// (240 layout units) high.
pub(crate) fn metrics() -> FixedMetrics {
    FixedMetrics::new(1.5, 10.0, 2.0)
}

pub(crate) const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
    sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

/// A document `width` layout units wide holding `text`.
pub(crate) fn document(width: i32, text: &str) -> Document {
    let mut doc = Document::new(DocumentConfig {
        width,
        ..DocumentConfig::default()
    });
    doc.set_plain_text(text);
    doc
}

pub(crate) fn paragraph_ids(doc: &Document) -> Vec<ParagraphId> {
    doc.iter().map(|(id, _)| id).collect()
}

/// The visible text of every line of `id`.
pub(crate) fn line_texts(doc: &Document, id: ParagraphId) -> Vec<String> {
    let p = doc.get(id).expect("paragraph exists");
    let run = p.run();
    let lines = p.lines();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let end = lines.get(i + 1).map_or(run.text_len(), |next| next.start);
            run.mid(line.start, end.saturating_sub(line.start))
        })
        .collect()
}
