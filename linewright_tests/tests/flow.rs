// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frames, pages and exclusions.

use linewright::{Exclusion, FrameFlow, Side};

use crate::util::{document, line_texts, metrics};

#[test]
fn flow_exclusion_narrows_overlapping_lines() {
    let mut doc = document(300, "aaaa bbbb cccc dddd");
    let mut flow = FrameFlow::new(300);
    flow.add_exclusion(Exclusion::new(Side::Right, 0, 240, 120));
    doc.set_flow(Box::new(flow));
    assert!(doc.format_all(&metrics()));
    let id = doc.first().unwrap();
    assert_eq!(line_texts(&doc, id), ["aaaa ", "bbbb cccc ", "dddd"]);
    assert!(!doc.get(id).unwrap().is_full_width());
}

#[test]
fn flow_incomplete_until_room_is_added() {
    let mut doc = document(250, "abcdefghijklmnopqrstuvwx");
    doc.set_flow(Box::new(FrameFlow::paged(250, 480, 1)));
    assert!(!doc.format_all(&metrics()), "the third line does not fit");

    let mut flow = FrameFlow::paged(250, 480, 1);
    flow.add_page();
    doc.set_flow(Box::new(flow));
    assert!(doc.format_all(&metrics()));
    assert_eq!(doc.height(), 720);
}

#[test]
fn flow_wide_character_overflows_on_its_line() {
    let mut doc = document(20, "ab");
    assert!(doc.format_all(&metrics()), "an unbounded flow always completes");
    let id = doc.first().unwrap();
    assert_eq!(line_texts(&doc, id), ["a", "b"]);
}
