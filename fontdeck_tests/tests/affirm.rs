// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fetch-or-create semantics of glyphs and decks.

use crate::test_name;
use crate::util::TestEnv;
use fontdeck::{DeckKey, GlyphState, UpdateTarget};

#[test]
fn affirm_returns_same_record_and_queues_once() {
    let mut env = TestEnv::new(test_name!());

    let first: *const _ = env.cache.affirm_glyph(12.0, 'a');
    let second: *const _ = env.cache.affirm_glyph(12.0, 'a');
    assert_eq!(first, second);

    let deck = env.cache.deck(DeckKey::new(12.0, 72)).unwrap();
    assert_eq!(deck.len(), 1);
    assert_eq!(deck.pending().collect::<Vec<_>>(), vec!['a']);
    assert_eq!(deck.get('a').unwrap().state(), GlyphState::Pending);
}

#[test]
fn affirm_keeps_request_order() {
    let mut env = TestEnv::new(test_name!());
    for code in "hello".chars() {
        env.cache.affirm_glyph(16.0, code);
    }
    let deck = env.cache.deck(DeckKey::new(16.0, 72)).unwrap();
    assert_eq!(deck.len(), 4);
    assert_eq!(deck.pending().collect::<String>(), "helo");
}

#[test]
fn affirm_normalizes_point_size() {
    let mut env = TestEnv::new(test_name!());
    env.cache.affirm_glyph(12.0, 'a');
    env.cache.affirm_glyph(12.000_001, 'a');
    env.cache.affirm_glyph(6.0 + 6.0, 'b');

    assert_eq!(env.cache.decks().count(), 1);
    assert_eq!(env.cache.stats().glyphs, 2);
    assert_eq!(env.cache.stats().pending, 2);
}

#[test]
fn affirm_after_update_does_not_requeue() {
    let mut env = TestEnv::new(test_name!());
    env.cache.affirm_glyph(20.0, 'a');
    env.cache.update_pending(UpdateTarget::Metrics).unwrap();
    assert_eq!(env.opens(), 1);

    let record = env.cache.affirm_glyph(20.0, 'a');
    assert_eq!(record.state(), GlyphState::Measured);
    assert!(!record.is_queued());
    assert!(!env.cache.has_pending());

    // Nothing is pending, so the font is not opened again.
    let report = env.cache.update_pending(UpdateTarget::Bitmap).unwrap();
    assert!(report.is_empty());
    assert_eq!(env.opens(), 1);
}

#[test]
fn affirm_get_deck_creates_empty_deck() {
    let mut env = TestEnv::new(test_name!());
    let deck = env.cache.get_deck(30.0);
    assert!(deck.is_empty());
    assert_eq!(deck.points(), 30.0);
    assert_eq!(deck.line_extents(), None);

    // Fetching again does not create a second deck.
    env.cache.get_deck(30.0);
    let stats = env.cache.stats();
    assert_eq!(stats.decks, 1);
    assert_eq!(stats.sizes_used, vec![30.0]);
    assert!(!env.cache.has_pending());
}

#[test]
fn affirm_glyph_lookup_does_not_create() {
    let mut env = TestEnv::new(test_name!());
    assert!(env.cache.glyph(12.0, 'a').is_none());
    assert_eq!(env.cache.decks().count(), 0);

    env.cache.affirm_glyph_at(12.0, 144, 'a');
    // A different resolution is a different deck.
    assert!(env.cache.glyph(12.0, 'a').is_none());
    assert!(env.cache.deck(DeckKey::new(12.0, 144)).is_some());
}
