// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formatting of whole documents and unit conversion.

use linewright::{
    Alignment, Document, DocumentConfig, LayoutChanges, ParagraphLayout, ZoomConfig, ZoomHandler,
};

use crate::util::{LOREM, document, line_texts, metrics, paragraph_ids};

#[test]
fn basic_empty_document() {
    let mut doc = Document::new(DocumentConfig::default());
    assert_eq!(doc.paragraph_count(), 1);
    assert!(doc.format_all(&metrics()));
    let p = doc.get(doc.first().unwrap()).unwrap();
    assert_eq!(p.line_count(), 1, "an empty paragraph still has a line");
    assert_eq!(p.height(), 240);
    assert_eq!(doc.width_used(), 0);
}

#[test]
fn basic_long_word_is_broken() {
    let mut doc = document(250, "abcdefghi");
    assert!(doc.format_all(&metrics()));
    let id = doc.first().unwrap();
    assert_eq!(line_texts(&doc, id), ["abcdefgh", "i"]);
    let p = doc.get(id).unwrap();
    let tops: Vec<i32> = p.lines().iter().map(|line| line.y).collect();
    assert_eq!(tops, [0, 240]);
    assert_eq!(p.height(), 480);
}

#[test]
fn basic_line_queries() {
    let mut doc = document(250, "aaa bbb ccc");
    assert!(doc.format_all(&metrics()));
    let p = doc.get(doc.first().unwrap()).unwrap();
    assert_eq!(p.line_of_char(0), Some(0));
    assert_eq!(p.line_of_char(7), Some(0), "the breaking space stays on its line");
    assert_eq!(p.line_of_char(8), Some(1));
    assert_eq!(p.line_of_char(11), Some(1), "the anchor is on the last line");
    assert_eq!(p.line_of_char(12), None);
    assert_eq!(p.line_height_of_char(9), 240);
    assert_eq!(p.line(1).map(|line| line.start), Some(8));
}

#[test]
fn basic_reformatting_is_deterministic() {
    let mut doc = document(3000, LOREM);
    let id = doc.first().unwrap();
    let justified = ParagraphLayout {
        alignment: Alignment::Justified,
        ..ParagraphLayout::default()
    };
    doc.set_layout(id, &justified, LayoutChanges::ALIGNMENT).unwrap();
    assert!(doc.format_all(&metrics()));
    let snapshot = |doc: &Document| {
        let p = doc.get(id).unwrap();
        let chars: Vec<(i32, i32)> = p.run().chars().iter().map(|c| (c.x(), c.width())).collect();
        (p.lines().to_vec(), chars)
    };
    let first = snapshot(&doc);
    doc.invalidate_all();
    assert!(doc.format_all(&metrics()));
    assert_eq!(first, snapshot(&doc));
}

#[test]
fn basic_justified_last_line_is_not_stretched() {
    // The first line ends at x=3000 after its breaking space, 50 units short.
    let mut doc = document(3050, LOREM);
    let id = doc.first().unwrap();
    let justified = ParagraphLayout {
        alignment: Alignment::Justified,
        ..ParagraphLayout::default()
    };
    doc.set_layout(id, &justified, LayoutChanges::ALIGNMENT).unwrap();
    assert!(doc.format_all(&metrics()));
    let p = doc.get(id).unwrap();
    assert_eq!(p.line_count(), 2);
    let last_start = p.lines()[1].start;
    assert_eq!(last_start, 100);
    let chars = p.run().chars();
    let stretch: i32 = chars[..last_start].iter().map(|c| c.width() - 30).sum();
    assert_eq!(stretch, 50, "the gaps of the first line absorb the free space");
    assert!(
        chars[..last_start]
            .iter()
            .filter(|c| c.width() > 30)
            .all(|c| c.is_white_space()),
        "only gaps are widened"
    );
    assert!(
        chars[last_start..].iter().all(|c| c.width() == 30),
        "no character on the last line is widened"
    );
}

#[test]
fn basic_pixel_positions_tile_without_gaps() {
    let mut doc = document(100_000, "The quick brown fox jumps over the lazy dog");
    assert!(doc.format_all(&metrics()));
    let p = doc.get(doc.first().unwrap()).unwrap();
    for zoom in [50, 75, 100, 133, 150, 200] {
        for dpi in [72.0, 96.0] {
            let handler = ZoomHandler::new(ZoomConfig {
                zoom,
                dpi_x: dpi,
                dpi_y: dpi,
                ..ZoomConfig::default()
            });
            for i in 0..p.len() - 1 {
                let x = p.char_pixel_x(i, &handler).unwrap();
                let width = p.char_pixel_width(i, &handler).unwrap();
                let next = p.char_pixel_x(i + 1, &handler).unwrap();
                assert_eq!(x + width, next, "gap after character {i} at zoom {zoom}, {dpi} dpi");
            }
        }
    }
}

#[test]
fn basic_pixel_rects_of_neighbors_touch() {
    let mut doc = document(5000, "one\ntwo\nthree");
    assert!(doc.format_all(&metrics()));
    let ids = paragraph_ids(&doc);
    let handler = ZoomHandler::new(ZoomConfig {
        zoom: 133,
        ..ZoomConfig::default()
    });
    for pair in ids.windows(2) {
        let above = doc.get(pair[0]).unwrap().pixel_rect(&handler);
        let below = doc.get(pair[1]).unwrap().pixel_rect(&handler);
        assert_eq!(above.y + above.height, below.y);
    }
}

#[test]
fn basic_margins_separate_paragraphs() {
    let mut doc = document(5000, "one\ntwo");
    let [first, second] = paragraph_ids(&doc)[..] else {
        panic!("expected two paragraphs");
    };
    let mut spaced = ParagraphLayout::default();
    spaced.margins.top = 6.;
    spaced.margins.bottom = 3.;
    for id in [first, second] {
        doc.set_layout(id, &spaced, LayoutChanges::MARGINS).unwrap();
    }
    assert!(doc.format_all(&metrics()));
    let first = doc.get(first).unwrap();
    assert_eq!(first.lines()[0].y, 0, "the first paragraph starts at the top");
    assert_eq!(first.height(), 300);
    let second = doc.get(second).unwrap();
    assert_eq!(second.rect().y, 300);
    assert_eq!(second.lines()[0].y, 120);
    assert_eq!(second.height(), 420);
}

#[test]
fn basic_single_gap_absorbs_free_space() {
    let mut doc = document(400, "Hello World next");
    let id = doc.first().unwrap();
    let justified = ParagraphLayout {
        alignment: Alignment::Justified,
        ..ParagraphLayout::default()
    };
    doc.set_layout(id, &justified, LayoutChanges::ALIGNMENT).unwrap();
    assert!(doc.format_all(&metrics()));
    assert_eq!(line_texts(&doc, id), ["Hello World ", "next"]);
    let chars = doc.get(id).unwrap().run().chars();
    assert_eq!(chars[5].width(), 70, "the gap takes the 40 free units");
    assert_eq!(chars[6].x(), 220);
    assert!(
        chars[..11]
            .iter()
            .filter(|c| !c.is_white_space())
            .all(|c| c.width() == 30),
        "glyph widths are unchanged"
    );
}
