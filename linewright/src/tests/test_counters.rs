// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{METRICS, chapter_layout, ids, list_layout, narrow_document};
use crate::counter::{CounterAlignment, CounterStyle, Numbering, ParagraphCounter};
use crate::{LayoutChanges, ParagraphLayout};

fn numbered(count: usize) -> crate::Document {
    let text = ["item"; 16][..count].join("\n");
    let mut doc = narrow_document(&text);
    for id in ids(&doc) {
        doc.set_layout(id, &list_layout(0), LayoutChanges::BULLET_NUMBER)
            .unwrap();
    }
    doc
}

#[test]
fn list_numbers_follow_document_order() {
    let mut doc = numbered(4);
    let numbers: Vec<_> = ids(&doc)
        .into_iter()
        .map(|id| doc.counter_number(id))
        .collect();
    assert_eq!(numbers, [Some(1), Some(2), Some(3), Some(4)]);
    let first = doc.first().unwrap();
    assert_eq!(doc.counter_text(first), "1. ");
}

#[test]
fn inserted_heading_resets_the_list() {
    let mut doc = numbered(2);
    let [first, second] = ids(&doc)[..] else {
        panic!("expected two paragraphs");
    };
    assert_eq!(doc.counter_number(second), Some(2));
    doc.insert_paragraph_after(Some(first), chapter_layout(0))
        .unwrap();
    assert_eq!(doc.counter_number(second), Some(1));
}

#[test]
fn removing_an_item_renumbers_the_rest() {
    let mut doc = numbered(3);
    let [_, second, third] = ids(&doc)[..] else {
        panic!("expected three paragraphs");
    };
    assert_eq!(doc.counter_number(third), Some(3));
    doc.remove_paragraph(second).unwrap();
    assert_eq!(doc.counter_number(third), Some(2));
}

#[test]
fn unnumbered_counters_are_dropped_outside_outlines() {
    let mut doc = numbered(1);
    let id = doc.first().unwrap();
    let mut layout = ParagraphLayout {
        counter: Some(ParagraphCounter::new(Numbering::None, CounterStyle::None)),
        ..ParagraphLayout::default()
    };
    doc.set_layout(id, &layout, LayoutChanges::BULLET_NUMBER)
        .unwrap();
    assert!(doc.get(id).unwrap().layout().counter.is_none());

    layout.outline = true;
    doc.set_layout(id, &layout, LayoutChanges::BULLET_NUMBER)
        .unwrap();
    assert!(doc.get(id).unwrap().layout().counter.is_some());
    assert_eq!(doc.counter_text(id), "");
}

#[test]
fn unselected_changes_are_ignored() {
    let mut doc = numbered(1);
    let id = doc.first().unwrap();
    doc.set_layout(id, &ParagraphLayout::default(), LayoutChanges::ALIGNMENT)
        .unwrap();
    assert!(doc.get(id).unwrap().layout().counter.is_some());
}

#[test]
fn label_width_indents_the_text() {
    let mut doc = numbered(2);
    assert!(doc.format_all(&METRICS));
    let first = doc.first().unwrap();
    assert_eq!(doc.counter_width(first, &METRICS), 90);
    let p = doc.get(first).unwrap();
    assert_eq!(p.run().chars()[0].x(), 90, "\"1. \" is three characters wide");
}

#[test]
fn label_indents_only_the_first_line() {
    let mut doc = narrow_document("aaaa bbbb cccc");
    let id = doc.first().unwrap();
    doc.set_layout(id, &list_layout(0), LayoutChanges::BULLET_NUMBER)
        .unwrap();
    assert!(doc.format_all(&METRICS));
    let p = doc.get(id).unwrap();
    let starts: Vec<usize> = p.lines().iter().map(|line| line.start).collect();
    assert_eq!(starts, [0, 5, 10]);
    assert_eq!(p.run().chars()[0].x(), 90);
    assert_eq!(p.run().chars()[5].x(), 0, "later lines start at the margin");
    assert_eq!(p.run().chars()[10].x(), 0, "later lines start at the margin");
}

#[test]
fn trailing_label_takes_no_room_from_the_text() {
    let mut doc = narrow_document("aaaa bbbb");
    let id = doc.first().unwrap();
    let mut layout = list_layout(0);
    if let Some(counter) = &mut layout.counter {
        counter.set_alignment(CounterAlignment::Right);
    }
    doc.set_layout(id, &layout, LayoutChanges::BULLET_NUMBER)
        .unwrap();
    assert!(doc.format_all(&METRICS));
    assert_eq!(doc.counter_width(id, &METRICS), 90);
    let p = doc.get(id).unwrap();
    assert_eq!(p.run().chars()[0].x(), 0);
    assert_eq!(p.line_count(), 2);
}
