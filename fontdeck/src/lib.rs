// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fontdeck caches rasterized glyphs per point size and packs their bitmaps
//! into a growable list of fixed-size texture pages.
//!
//! The entry point is [`FontCache`]. Requesting a character at a point size
//! ([`FontCache::affirm_glyph`]) only registers it; the glyph is measured, and
//! optionally placed and rasterized, by the next batched update pass
//! ([`FontCache::update_pending`]). Glyphs requested at different sizes live
//! in independent [`GlyphDeck`]s, while all decks share the same
//! [`GlyphPage`]s so a renderer can draw text with few texture switches.
//!
//! ```no_run
//! use fontdeck::{FontCache, UpdateTarget};
//!
//! let mut cache: FontCache = FontCache::default();
//! cache.load("assets/fonts/Roboto-Regular.ttf");
//! for ch in "Hello".chars() {
//!     cache.affirm_glyph(24.0, ch);
//! }
//! let report = cache.update_pending(UpdateTarget::Bitmap)?;
//! assert_eq!(report.placed, 4);
//! # Ok::<(), fontdeck::Error>(())
//! ```
//!
//! ## Features
//!
//! - `png` (enabled by default): Enables writing page canvases as PNG images.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod atlas;
pub mod engine;

mod cache;
mod config;
mod deck;
mod error;
mod glyph;
mod key;
mod raster;

pub use atlas::{Canvas, GlyphPage, PageId, PageRect, ShelfAllocator};
pub use cache::{CacheStats, FontCache, UpdateReport, UpdateTarget, UnplacedGlyph};
pub use config::{CacheConfig, DEFAULT_DPI, DEFAULT_PAGE_SIZE, DEFAULT_PADDING};
pub use deck::GlyphDeck;
pub use engine::{
    FontEngine, FontFace, FontSource, LineExtents, LoadedGlyph, SkrifaEngine, SkrifaFace,
};
pub use error::{Error, ErrorKind};
pub use glyph::{GlyphMetrics, GlyphRecord, GlyphState, Placement};
pub use key::{DeckKey, PointSize};
pub use raster::{CoverageSpan, Outline, SpanPainter};
