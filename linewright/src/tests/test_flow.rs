// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{METRICS, ids, narrow_document};
use crate::layout::PageBreaking;
use crate::{Document, FormatterSettings, FrameFlow, LayoutChanges, ParagraphLayout};

#[test]
fn full_page_reports_incomplete_until_a_page_is_added() {
    let mut doc = narrow_document("abcdefghijklmnopqrstuvwx");
    doc.set_flow(Box::new(FrameFlow::paged(250, 480, 1)));
    assert!(!doc.format_all(&METRICS));
    let id = doc.first().unwrap();
    assert!(!doc.get(id).unwrap().is_valid(), "kept invalid for a retry");

    doc.set_flow(Box::new(FrameFlow::paged(250, 480, 2)));
    assert!(doc.format_all(&METRICS));
    assert_eq!(doc.get(id).unwrap().line_count(), 3);
}

#[test]
fn page_breaking_moves_lines_to_the_next_page() {
    let mut doc = narrow_document("abcdefghijklmnop\nab");
    doc.set_settings(FormatterSettings {
        page_breaking: true,
        ..FormatterSettings::default()
    });
    doc.set_flow(Box::new(FrameFlow::paged(250, 500, 2)));
    assert!(doc.format_all(&METRICS));
    let [first, second] = ids(&doc)[..] else {
        panic!("expected two paragraphs");
    };
    assert!(!doc.get(first).unwrap().was_moved_down());
    let second = doc.get(second).unwrap();
    assert!(second.was_moved_down());
    assert_eq!(second.rect().y, 480);
    assert_eq!(second.lines()[0].y, 20, "the line starts on the second page");
    assert_eq!(second.height(), 260);
}

#[test]
fn width_changes_reflow_everything() {
    let mut doc = narrow_document("abcdefghi");
    assert!(doc.format_all(&METRICS));
    let id = doc.first().unwrap();
    assert_eq!(doc.get(id).unwrap().line_count(), 2);
    doc.set_width(1000);
    assert!(!doc.get(id).unwrap().is_valid());
    assert!(doc.format_all(&METRICS));
    assert_eq!(doc.get(id).unwrap().line_count(), 1);
}

fn paged_document(text: &str) -> Document {
    let mut doc = narrow_document(text);
    doc.set_settings(FormatterSettings {
        page_breaking: true,
        ..FormatterSettings::default()
    });
    doc.set_flow(Box::new(FrameFlow::paged(250, 1000, 2)));
    doc
}

fn breaking(flags: PageBreaking) -> ParagraphLayout {
    ParagraphLayout {
        page_breaking: flags,
        ..ParagraphLayout::default()
    }
}

#[test]
fn hard_break_before_starts_a_new_page() {
    let mut doc = paged_document("a\nb");
    let [first, second] = ids(&doc)[..] else {
        panic!("expected two paragraphs");
    };
    doc.set_layout(
        second,
        &breaking(PageBreaking::HARD_BREAK_BEFORE),
        LayoutChanges::PAGE_BREAKING,
    )
    .unwrap();
    assert!(doc.format_all(&METRICS));
    assert_eq!(doc.get(first).unwrap().height(), 240);
    let second = doc.get(second).unwrap();
    assert!(second.was_moved_down());
    assert_eq!(second.rect().y, 240);
    assert_eq!(second.lines()[0].y, 760, "the line starts at the top of page two");
    assert_eq!(second.height(), 1000);
}

#[test]
fn hard_break_after_moves_the_next_paragraph() {
    let mut doc = paged_document("a\nb");
    assert!(doc.format_all(&METRICS));
    let [first, second] = ids(&doc)[..] else {
        panic!("expected two paragraphs");
    };
    assert_eq!(doc.get(second).unwrap().lines()[0].y, 0);

    doc.set_layout(
        first,
        &breaking(PageBreaking::HARD_BREAK_AFTER),
        LayoutChanges::PAGE_BREAKING,
    )
    .unwrap();
    assert!(!doc.get(second).unwrap().is_valid(), "the next paragraph is reformatted");
    assert!(doc.format_all(&METRICS));
    assert_eq!(doc.get(first).unwrap().lines()[0].y, 0, "the break is after, not before");
    assert_eq!(doc.get(second).unwrap().lines()[0].y, 760);
}

#[test]
fn hard_break_at_a_page_top_adds_nothing() {
    let mut doc = paged_document("b");
    let id = doc.first().unwrap();
    doc.set_layout(
        id,
        &breaking(PageBreaking::HARD_BREAK_BEFORE),
        LayoutChanges::PAGE_BREAKING,
    )
    .unwrap();
    assert!(doc.format_all(&METRICS));
    let p = doc.get(id).unwrap();
    assert!(!p.was_moved_down());
    assert_eq!(p.lines()[0].y, 0);
}
