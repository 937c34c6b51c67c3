// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font cache: per-size glyph decks sharing a pool of glyph pages.

use std::path::PathBuf;

use hashbrown::HashMap;

use crate::atlas::{GlyphPage, PageId, PageRect};
use crate::config::CacheConfig;
use crate::deck::GlyphDeck;
use crate::engine::{FontEngine, FontFace, FontSource, LineExtents, LoadedGlyph, SkrifaEngine};
use crate::error::Error;
use crate::glyph::{GlyphRecord, GlyphState, Placement};
use crate::key::DeckKey;
use crate::raster::SpanPainter;

/// How far an update pass takes each pending glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UpdateTarget {
    /// Compute metrics only. No page is allocated and no canvas is touched.
    #[default]
    Metrics,
    /// Compute metrics, then place and rasterize the glyph bitmap.
    Bitmap,
}

/// A glyph whose bitmap could not be placed during an update pass.
#[derive(Debug)]
pub struct UnplacedGlyph {
    /// The deck the glyph belongs to.
    pub key: DeckKey,
    /// The character.
    pub code: char,
    /// Why placement failed.
    pub error: Error,
}

/// Outcome of one update pass.
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Number of glyphs whose metrics were computed.
    pub measured: usize,
    /// Number of glyphs placed and rasterized into a page.
    pub placed: usize,
    /// Number of glyphs skipped because they have no scalable outline.
    pub unsupported: usize,
    /// Number of pages created during the pass.
    pub pages_created: usize,
    /// Glyphs that have metrics but no bitmap because placement failed.
    pub unplaced: Vec<UnplacedGlyph>,
}

impl UpdateReport {
    /// Whether the pass processed no glyphs at all.
    pub fn is_empty(&self) -> bool {
        self.measured == 0 && self.unsupported == 0
    }
}

/// Statistics about cached glyphs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CacheStats {
    /// Number of glyph decks.
    pub decks: usize,
    /// Total number of glyph records across all decks.
    pub glyphs: usize,
    /// Records waiting for the next update pass.
    pub pending: usize,
    /// Records whose bitmap is stored in a page.
    pub placed: usize,
    /// Number of pages.
    pub pages: usize,
    /// Number of pages whose canvas has been allocated.
    pub canvases: usize,
    /// Point sizes with a deck, in deck creation order.
    pub sizes_used: Vec<f32>,
}

/// Caches glyphs of one font per point size and packs their bitmaps into a
/// shared, growable list of fixed-size pages.
///
/// Requests only register glyphs; an update pass ([`FontCache::update_pending`])
/// opens the font once, processes every queued glyph of every deck, and
/// releases the font again. Decks are processed in creation order and each
/// deck's queue in request order, so the resulting metrics and page layout
/// depend only on the sequence of requests.
///
/// Nothing is ever evicted: records, decks and pages live as long as the
/// cache. The cache is not synchronized; callers serialize access.
pub struct FontCache<E = SkrifaEngine> {
    engine: E,
    config: CacheConfig,
    source: Option<FontSource>,
    decks: Vec<GlyphDeck>,
    deck_index: HashMap<DeckKey, usize>,
    pages: Vec<GlyphPage>,
}

impl FontCache<SkrifaEngine> {
    /// Creates an empty cache that loads fonts with [`SkrifaEngine`].
    pub fn new(config: CacheConfig) -> Self {
        Self::with_engine(SkrifaEngine, config)
    }
}

impl Default for FontCache<SkrifaEngine> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<E: FontEngine> FontCache<E> {
    /// Creates an empty cache that loads fonts with `engine`.
    pub fn with_engine(engine: E, config: CacheConfig) -> Self {
        Self {
            engine,
            config,
            source: None,
            decks: Vec::new(),
            deck_index: HashMap::new(),
            pages: Vec::new(),
        }
    }

    /// Binds the cache to the font file at `path`.
    ///
    /// The file is not opened until the next update pass.
    pub fn load(&mut self, path: impl Into<PathBuf>) {
        self.load_index(path, 0);
    }

    /// Binds the cache to face `index` of the font collection at `path`.
    pub fn load_index(&mut self, path: impl Into<PathBuf>, index: u32) {
        self.source = Some(FontSource::with_index(path, index));
    }

    /// The bound font, if any.
    pub fn source(&self) -> Option<&FontSource> {
        self.source.as_ref()
    }

    /// The cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The font engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the record for `code` at `points`, creating and queueing it
    /// if it does not exist yet. Uses the configured resolution.
    pub fn affirm_glyph(&mut self, points: f32, code: char) -> &GlyphRecord {
        let dpi = self.config.dpi;
        self.affirm_glyph_at(points, dpi, code)
    }

    /// Returns the record for `code` at `points` and `dpi`, creating and
    /// queueing it if it does not exist yet.
    ///
    /// Repeated calls return the same record and never queue it twice.
    pub fn affirm_glyph_at(&mut self, points: f32, dpi: u32, code: char) -> &GlyphRecord {
        let deck = self.affirm_deck(DeckKey::new(points, dpi));
        self.decks[deck].affirm_record(code)
    }

    /// Returns the deck for `points` at the configured resolution, creating
    /// an empty one if needed.
    pub fn get_deck(&mut self, points: f32) -> &GlyphDeck {
        let key = DeckKey::new(points, self.config.dpi);
        let deck = self.affirm_deck(key);
        &self.decks[deck]
    }

    /// Returns the deck for `key`, if it exists.
    pub fn deck(&self, key: DeckKey) -> Option<&GlyphDeck> {
        self.deck_index.get(&key).map(|&i| &self.decks[i])
    }

    /// Iterates over all decks in creation order.
    pub fn decks(&self) -> impl Iterator<Item = &GlyphDeck> + '_ {
        self.decks.iter()
    }

    /// Looks up the record for `code` at `points` and the configured
    /// resolution without creating anything.
    pub fn glyph(&self, points: f32, code: char) -> Option<&GlyphRecord> {
        self.deck(DeckKey::new(points, self.config.dpi))?.get(code)
    }

    /// The pages in creation order.
    pub fn pages(&self) -> &[GlyphPage] {
        &self.pages
    }

    /// The pages, most recently created first.
    pub fn pages_newest_first(&self) -> impl Iterator<Item = &GlyphPage> + '_ {
        self.pages.iter().rev()
    }

    /// Returns the page holding a placement.
    pub fn page(&self, id: PageId) -> Option<&GlyphPage> {
        self.pages.get(id.index())
    }

    /// Whether any deck has glyphs queued for the next update pass.
    pub fn has_pending(&self) -> bool {
        self.decks.iter().any(|deck| deck.pending_len() > 0)
    }

    /// Places the bitmap of an already measured glyph.
    ///
    /// Fails with [`ErrorKind::UnknownGlyph`](crate::ErrorKind::UnknownGlyph)
    /// unless the glyph has been measured and has ink, and with
    /// [`ErrorKind::GlyphTooLarge`](crate::ErrorKind::GlyphTooLarge) when
    /// its cell exceeds an empty page. Returns the existing placement if the
    /// glyph has one. Otherwise the
    /// glyph's `width` x line height cell is reserved on the newest page with
    /// room, or on a new page. The canvas is left untouched; the next
    /// bitmap-level pass does not rasterize glyphs placed this way, so this
    /// is meant for callers that paint the region themselves.
    pub fn allocate(&mut self, key: DeckKey, code: char) -> Result<Placement, Error> {
        let config = self.config;
        let Some(&deck) = self.deck_index.get(&key) else {
            return Err(Error::unknown_glyph(code));
        };
        let deck = &mut self.decks[deck];
        let Some(record) = deck.slot(code).and_then(|slot| deck.record_mut(slot)) else {
            return Err(Error::unknown_glyph(code));
        };
        if let Some(placement) = record.placement() {
            return Ok(*placement);
        }
        if record.state() != GlyphState::Measured {
            return Err(Error::unknown_glyph(code));
        }
        let (width, height) = cell_size(record.width(), record.height());
        let (placement, _) = allocate_in(&mut self.pages, &config, width, height)?;
        record.set_placement(placement);
        Ok(placement)
    }

    /// Runs an update pass over every queued glyph.
    ///
    /// The font is opened once for the whole pass and released before
    /// returning. If it cannot be opened, the failure is logged and returned,
    /// and every queued glyph stays queued for the next pass. Otherwise
    /// per-glyph problems are collected into the report and never abort the
    /// pass.
    pub fn update_pending(&mut self, target: UpdateTarget) -> Result<UpdateReport, Error> {
        let mut report = UpdateReport::default();
        if !self.has_pending() {
            return Ok(report);
        }
        let Some(source) = self.source.as_ref() else {
            log::error!("cannot update glyphs: no font loaded");
            return Err(Error::no_font());
        };
        let mut face = match self.engine.open(source) {
            Ok(face) => face,
            Err(err) => {
                log::error!("{err}");
                return Err(err);
            }
        };

        let config = self.config;
        for deck in &mut self.decks {
            let pending = deck.take_pending();
            if pending.is_empty() {
                continue;
            }
            let key = deck.key();
            let ppem = key.pixels_per_em();
            log::trace!("updating {} glyphs at {key} ({ppem} ppem)", pending.len());

            face.set_size(ppem);
            let line = if ppem > 0.0 {
                face.line_extents()
            } else {
                LineExtents::default()
            };
            deck.set_line_extents(line);

            for slot in pending {
                let Some(record) = deck.record_mut(slot) else {
                    continue;
                };
                let code = record.code();
                let glyph = if ppem > 0.0 {
                    face.load_glyph(code)
                } else {
                    Some(LoadedGlyph::default())
                };
                let Some(glyph) = glyph else {
                    log::debug!("no scalable outline for {code:?} at {key}");
                    record.set_state(GlyphState::Unsupported);
                    report.unsupported += 1;
                    continue;
                };

                record.set_metrics(glyph.metrics(line));
                report.measured += 1;
                let (width, height) = cell_size(record.width(), record.height());
                if glyph.outline.is_empty() || width == 0 || height == 0 {
                    if record.placement().is_none() {
                        record.set_state(GlyphState::Blank);
                    }
                    continue;
                }
                if target < UpdateTarget::Bitmap || record.placement().is_some() {
                    continue;
                }

                let allocated = allocate_in(&mut self.pages, &config, width, height);
                let (placement, created) = match allocated {
                    Ok(placed) => placed,
                    Err(error) => {
                        log::warn!("cannot place {code:?} at {key}: {error}");
                        record.set_state(GlyphState::TooLarge);
                        report.unplaced.push(UnplacedGlyph { key, code, error });
                        continue;
                    }
                };
                if created {
                    report.pages_created += 1;
                }

                let page = &mut self.pages[placement.page.index()];
                let pen_x = i32::from(placement.src_x) - to_i32(record.bearing_x());
                let pen_y = i32::from(placement.src_y) + line.ascent;
                let mut painter =
                    SpanPainter::with_clip(page.affirm_canvas(), pen_x, pen_y, placement.rect());
                glyph.outline.rasterize(|scanline, spans| {
                    painter.paint(scanline, spans);
                });

                record.set_placement(placement);
                report.placed += 1;
            }
        }
        drop(face);

        Ok(report)
    }

    /// Computes metrics for every queued glyph without touching any page.
    pub fn load_glyph_metrics(&mut self) -> Result<UpdateReport, Error> {
        self.update_pending(UpdateTarget::Metrics)
    }

    /// Affirms every character of `text` at `points` and `dpi`, then runs a
    /// metrics-only update pass.
    pub fn preload_glyphs(
        &mut self,
        text: &str,
        points: f32,
        dpi: u32,
    ) -> Result<UpdateReport, Error> {
        for code in text.chars() {
            self.affirm_glyph_at(points, dpi, code);
        }
        self.update_pending(UpdateTarget::Metrics)
    }

    /// Affirms every character of `text` at `points` and `dpi`, then runs a
    /// bitmap-level update pass.
    ///
    /// Characters that were already measured by an earlier metrics-only pass
    /// are queued again so they receive a bitmap too.
    pub fn preload_bitmaps(
        &mut self,
        text: &str,
        points: f32,
        dpi: u32,
    ) -> Result<UpdateReport, Error> {
        for code in text.chars() {
            self.affirm_glyph_at(points, dpi, code);
        }
        self.request_bitmaps(points, dpi);
        self.update_pending(UpdateTarget::Bitmap)
    }

    /// Queues every measured glyph of the deck for `points` at `dpi` that
    /// has no bitmap yet. Returns the number of glyphs queued.
    pub fn request_bitmaps(&mut self, points: f32, dpi: u32) -> usize {
        match self.deck_index.get(&DeckKey::new(points, dpi)) {
            Some(&deck) => self.decks[deck].requeue_unplaced(),
            None => 0,
        }
    }

    /// Writes each page as `page<N>.png` into `dir`, where `N` is the page
    /// index in creation order. Returns the written paths.
    #[cfg(feature = "png")]
    pub fn write_pages(&self, dir: impl AsRef<std::path::Path>) -> Result<Vec<PathBuf>, Error> {
        use std::fs::File;
        use std::io::BufWriter;

        let dir = dir.as_ref();
        let mut written = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let path = dir.join(format!("{}.png", page.id()));
            let file = File::create(&path).map_err(|err| {
                Error::image_write(Some(path.clone()), "cannot create file").with_io_source(err)
            })?;
            page.write_png(BufWriter::new(file))
                .map_err(|err| err.with_path(&path))?;
            written.push(path);
        }
        Ok(written)
    }

    /// Returns statistics about the cached glyphs and pages.
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats {
            decks: self.decks.len(),
            pages: self.pages.len(),
            canvases: self.pages.iter().filter(|p| p.canvas().is_some()).count(),
            ..CacheStats::default()
        };
        for deck in &self.decks {
            stats.glyphs += deck.len();
            stats.pending += deck.pending_len();
            stats.placed += deck.glyphs().filter(|g| g.placement().is_some()).count();
            stats.sizes_used.push(deck.points());
        }
        stats
    }

    fn affirm_deck(&mut self, key: DeckKey) -> usize {
        if let Some(&index) = self.deck_index.get(&key) {
            return index;
        }
        let index = self.decks.len();
        self.decks.push(GlyphDeck::new(key));
        self.deck_index.insert(key, index);
        index
    }
}

impl<E> core::fmt::Debug for FontCache<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontCache")
            .field("source", &self.source)
            .field("config", &self.config)
            .field("decks", &self.decks.len())
            .field("pages", &self.pages.len())
            .finish_non_exhaustive()
    }
}

/// Reserves a padded `width` x `height` cell, probing the newest page first
/// and creating a page when none has room. Returns the placement and whether
/// a page was created.
fn allocate_in(
    pages: &mut Vec<GlyphPage>,
    config: &CacheConfig,
    width: u16,
    height: u16,
) -> Result<(Placement, bool), Error> {
    let max = config.max_glyph_size();
    if width > max || height > max {
        return Err(Error::glyph_too_large(width, height, config.page_size));
    }
    let border = config.padding.saturating_mul(2);
    let padded_w = width.saturating_add(border);
    let padded_h = height.saturating_add(border);

    let found = pages
        .iter_mut()
        .rev()
        .find_map(|page| page.try_alloc(padded_w, padded_h).map(|rect| (page.id(), rect)));
    let (page, rect, created) = match found {
        Some((page, rect)) => (page, rect, false),
        None => {
            let id = PageId(u32::try_from(pages.len()).unwrap_or(u32::MAX));
            let mut page = GlyphPage::new(id, config.page_size);
            let Some(rect) = page.try_alloc(padded_w, padded_h) else {
                return Err(Error::glyph_too_large(width, height, config.page_size));
            };
            log::debug!("created {id} for a {width}x{height} glyph");
            pages.push(page);
            (id, rect, true)
        }
    };
    Ok((placement_in(page, rect, config.padding, width, height), created))
}

fn placement_in(page: PageId, rect: PageRect, padding: u16, width: u16, height: u16) -> Placement {
    Placement {
        page,
        src_x: rect.x + padding,
        src_y: rect.y + padding,
        width,
        height,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "values are clamped to the u16 range before the cast"
)]
fn cell_size(width: f32, height: f32) -> (u16, u16) {
    let clamp = |v: f32| v.ceil().clamp(0.0, f32::from(u16::MAX)) as u16;
    (clamp(width), clamp(height))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "bearings are whole pixels far inside the i32 range"
)]
fn to_i32(value: f32) -> i32 {
    value as i32
}
