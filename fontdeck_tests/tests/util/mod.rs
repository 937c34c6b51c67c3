// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod asserts;
pub(crate) mod env;

pub(crate) use asserts::{assert_ink_inside_placements, assert_no_overlap};
pub(crate) use env::{TestEnv, BLOCK_FONT};

use fontdeck::{DeckKey, FontCache, FontEngine, GlyphMetrics, GlyphState, Placement};

/// Returns the current function name (for use in test naming).
#[macro_export]
macro_rules! test_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = &name[..name.len() - 3];
        let name = &name[name.rfind(':').map(|x| x + 1).unwrap_or(0)..];

        name
    }};
}

/// Everything observable about one cached glyph.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GlyphSnapshot {
    pub(crate) key: DeckKey,
    pub(crate) code: char,
    pub(crate) metrics: GlyphMetrics,
    pub(crate) state: GlyphState,
    pub(crate) placement: Option<Placement>,
}

/// Captures every record of every deck, in deck and record creation order.
pub(crate) fn snapshot<E: FontEngine>(cache: &FontCache<E>) -> Vec<GlyphSnapshot> {
    cache
        .decks()
        .flat_map(|deck| {
            deck.glyphs().map(move |glyph| GlyphSnapshot {
                key: deck.key(),
                code: glyph.code(),
                metrics: *glyph.metrics(),
                state: glyph.state(),
                placement: glyph.placement().copied(),
            })
        })
        .collect()
}

/// Every placement in the cache.
pub(crate) fn placements<E: FontEngine>(cache: &FontCache<E>) -> Vec<Placement> {
    snapshot(cache)
        .into_iter()
        .filter_map(|glyph| glyph.placement)
        .collect()
}

/// Rows of `placement`, counted from its top edge, that contain any ink.
pub(crate) fn inked_rows<E: FontEngine>(cache: &FontCache<E>, placement: &Placement) -> Vec<u16> {
    let Some(canvas) = cache.page(placement.page).and_then(|page| page.canvas()) else {
        return Vec::new();
    };
    let rect = placement.rect();
    (0..rect.height)
        .filter(|&row| {
            let y = i64::from(rect.y + row);
            (rect.x..rect.x + rect.width)
                .any(|x| canvas.pixel(i64::from(x), y).is_some_and(|a| a > 0))
        })
        .collect()
}
