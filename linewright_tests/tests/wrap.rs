// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking.

use linewright::{
    Direction, LayoutChanges, ParagraphLayout, PatternHyphenator, TabStop, TabType, TextFormat,
};

use crate::util::{LOREM, document, line_texts, metrics};

#[test]
fn wrap_at_spaces() {
    let mut doc = document(3000, LOREM);
    assert!(doc.format_all(&metrics()));
    let id = doc.first().unwrap();
    let lines = line_texts(&doc, id);
    assert!(lines.len() > 1, "the sample wraps");
    for line in &lines[..lines.len() - 1] {
        assert!(line.ends_with(' '), "`{line}` should end at a space");
    }
    let p = doc.get(id).unwrap();
    for c in p.run().chars().iter().filter(|c| !c.is_white_space()) {
        assert!(c.x() + c.width() <= 3000, "`{}` overflows", c.ch());
    }
}

#[test]
fn wrap_forced_newline() {
    let mut doc = document(5000, "");
    let id = doc.first().unwrap();
    doc.insert_text(id, 0, "first\nsecond").unwrap();
    assert!(doc.format_all(&metrics()));
    assert_eq!(line_texts(&doc, id), ["first\n", "second"]);
}

#[test]
fn wrap_soft_hyphen_takes_hyphen_width() {
    let mut doc = document(250, "abcdefg\u{AD}hijkl");
    assert!(doc.format_all(&metrics()));
    let id = doc.first().unwrap();
    assert_eq!(line_texts(&doc, id), ["abcdefg\u{AD}", "hijkl"]);
    let p = doc.get(id).unwrap();
    assert_eq!(p.run().chars()[7].width(), 30, "the hyphen is drawn");
}

#[test]
fn wrap_hyphenation_with_patterns() {
    let mut hyphenator = PatternHyphenator::new();
    hyphenator
        .add_patterns("en", "hy3ph he2n hena4 hen5at 1na n2at 1tio 2io o2n")
        .unwrap();
    let mut doc = document(250, "");
    doc.set_hyphenator(Some(Box::new(hyphenator)));
    let id = doc.first().unwrap();
    let format = TextFormat {
        language: Some("en-US".into()),
        hyphenation: true,
        ..TextFormat::default()
    };
    doc.insert_formatted_text(id, 0, "hyphenation", &format)
        .unwrap();
    assert!(doc.format_all(&metrics()));
    assert_eq!(line_texts(&doc, id), ["hyphen", "ation"]);
    assert!(doc.get(id).unwrap().lines()[0].hyphenated);
}

#[test]
fn wrap_missing_dictionary_breaks_normally() {
    let mut doc = document(250, "");
    doc.set_hyphenator(Some(Box::new(PatternHyphenator::new())));
    let id = doc.first().unwrap();
    let format = TextFormat {
        language: Some("nl".into()),
        hyphenation: true,
        ..TextFormat::default()
    };
    doc.insert_formatted_text(id, 0, "woordafbreking", &format)
        .unwrap();
    assert!(doc.format_all(&metrics()));
    assert_eq!(line_texts(&doc, id), ["woordafb", "reking"]);
}

#[test]
fn wrap_right_tab_stop() {
    let mut doc = document(1000, "a\tbc");
    let id = doc.first().unwrap();
    let mut layout = ParagraphLayout::default();
    layout.set_tabs([TabStop::new(10., TabType::Right)]);
    doc.set_layout(id, &layout, LayoutChanges::TABULATOR).unwrap();
    assert!(doc.format_all(&metrics()));
    let chars = doc.get(id).unwrap().run().chars();
    assert_eq!(chars[1].width(), 110);
    assert_eq!(chars[3].x() + chars[3].width(), 200, "the text ends at the stop");
}

#[test]
fn wrap_right_to_left_line_is_mirrored() {
    let mut doc = document(250, "\u{5d0}\u{5d1}\u{5d2}");
    let id = doc.first().unwrap();
    let layout = ParagraphLayout {
        direction: Direction::RightToLeft,
        ..ParagraphLayout::default()
    };
    doc.set_layout(id, &layout, LayoutChanges::DIRECTION).unwrap();
    assert!(doc.format_all(&metrics()));
    let p = doc.get(id).unwrap();
    assert!(p.run().is_right_to_left());
    let xs: Vec<i32> = p.run().chars()[..3].iter().map(|c| c.x()).collect();
    assert_eq!(xs, [220, 190, 160], "the first letter is rightmost");
}
