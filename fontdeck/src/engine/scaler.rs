// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font engine backed by Skrifa.

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use super::{FontEngine, FontFace, FontSource, LineExtents, LoadedGlyph};
use crate::raster::Outline;
use crate::Error;

/// Loads font files from disk and scales their outlines with Skrifa.
///
/// Characters missing from the character map resolve to `.notdef`.
/// Unhinted outlines are used, so metrics scale linearly with size.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkrifaEngine;

impl FontEngine for SkrifaEngine {
    type Face = SkrifaFace;

    fn open(&self, source: &FontSource) -> Result<SkrifaFace, Error> {
        let data =
            std::fs::read(source.path()).map_err(|err| Error::font_load(source.path(), err))?;
        // Validate once so that per-glyph parsing below cannot fail.
        FontRef::from_index(&data, source.index())
            .map_err(|err| Error::font_parse(source.path(), err.to_string()))?;
        Ok(SkrifaFace {
            data,
            index: source.index(),
            ppem: 0.0,
        })
    }
}

/// A font file held in memory for one update pass.
#[derive(Clone)]
pub struct SkrifaFace {
    data: Vec<u8>,
    index: u32,
    ppem: f32,
}

impl SkrifaFace {
    fn font(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).ok()
    }
}

impl FontFace for SkrifaFace {
    fn set_size(&mut self, ppem: f32) {
        self.ppem = ppem;
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "face extents in pixels are far inside the i32 range"
    )]
    fn line_extents(&self) -> LineExtents {
        let Some(font) = self.font() else {
            return LineExtents::default();
        };
        let metrics = font.metrics(Size::new(self.ppem), LocationRef::default());
        let (y_min, y_max) = match metrics.bounds {
            Some(bounds) => (bounds.y_min, bounds.y_max),
            None => (metrics.descent, metrics.ascent),
        };
        LineExtents {
            ascent: y_max.ceil() as i32,
            descent: y_min.floor() as i32,
        }
    }

    fn load_glyph(&mut self, code: char) -> Option<LoadedGlyph> {
        let font = self.font()?;
        let size = Size::new(self.ppem);
        let glyph_id = font.charmap().map(code).unwrap_or(GlyphId::NOTDEF);
        let glyph = font.outline_glyphs().get(glyph_id)?;

        let mut pen = OutlineSink(Outline::new());
        if let Err(err) = glyph.draw(DrawSettings::unhinted(size, LocationRef::default()), &mut pen)
        {
            log::debug!("failed to draw outline for {code:?}: {err}");
            return None;
        }
        let advance_x = font
            .glyph_metrics(size, LocationRef::default())
            .advance_width(glyph_id)
            .unwrap_or_default();
        Some(LoadedGlyph {
            advance_x,
            outline: pen.0,
        })
    }
}

impl core::fmt::Debug for SkrifaFace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkrifaFace")
            .field("len", &self.data.len())
            .field("index", &self.index)
            .field("ppem", &self.ppem)
            .finish_non_exhaustive()
    }
}

struct OutlineSink(Outline);

impl OutlinePen for OutlineSink {
    #[inline]
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    #[inline]
    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    #[inline]
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0.quad_to(cx0, cy0, x, y);
    }

    #[inline]
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to(cx0, cy0, cx1, cy1, x, y);
    }

    #[inline]
    fn close(&mut self) {
        self.0.close();
    }
}
