// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary to the outline font engine.
//!
//! A [`FontEngine`] opens a [`FontSource`] for the duration of one update
//! pass. The returned [`FontFace`] owns everything the engine needs and is
//! dropped when the pass ends, on every exit path, so nothing about the font
//! file outlives the call.

mod scaler;

use std::path::{Path, PathBuf};

use crate::glyph::GlyphMetrics;
use crate::raster::Outline;

pub use scaler::{SkrifaEngine, SkrifaFace};

/// Identifies a loadable font: a file and a face index within it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontSource {
    path: PathBuf,
    index: u32,
}

impl FontSource {
    /// The first face of the font file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_index(path, 0)
    }

    /// Face `index` of the font collection at `path`.
    pub fn with_index(path: impl Into<PathBuf>, index: u32) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }

    /// Path of the font file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the face within the file.
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Vertical extents of a face at the current size, in whole pixels above
/// (ascent) and below (descent, usually negative) the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineExtents {
    /// Distance from the baseline to the top of the face bounding box.
    pub ascent: i32,
    /// Distance from the baseline to the bottom of the face bounding box.
    pub descent: i32,
}

impl LineExtents {
    /// The line height shared by every glyph at this size.
    pub fn height(&self) -> i32 {
        (self.ascent - self.descent).max(0)
    }
}

/// A glyph loaded from a [`FontFace`].
#[derive(Clone, Debug, Default)]
pub struct LoadedGlyph {
    /// Pixel advance of the glyph.
    pub advance_x: f32,
    /// The scaled outline, in pixels with y pointing up from the baseline.
    pub outline: Outline,
}

impl LoadedGlyph {
    /// Derives whole-pixel metrics from the outline bounds.
    ///
    /// The bitmap cell spans `floor(x_min)..ceil(x_max)`, so it contains
    /// every pixel the rasterizer can touch.
    pub fn metrics(&self, line: LineExtents) -> GlyphMetrics {
        let (bearing_x, width) = match self.outline.bounds() {
            Some([x_min, _, x_max, _]) => {
                let left = x_min.floor();
                (left, (x_max.ceil() - left).max(0.0))
            }
            None => (0.0, 0.0),
        };
        GlyphMetrics {
            width,
            height: line.height() as f32,
            advance_x: self.advance_x.floor(),
            bearing_x,
        }
    }
}

/// Opens fonts for update passes.
pub trait FontEngine {
    /// The face type produced by [`FontEngine::open`].
    type Face: FontFace;

    /// Opens `source`. Failing to read or parse the font is reported as an
    /// error and must not panic.
    fn open(&self, source: &FontSource) -> Result<Self::Face, crate::Error>;
}

/// A font opened for one update pass.
pub trait FontFace {
    /// Selects the size, in pixels per em, used by subsequent calls.
    fn set_size(&mut self, ppem: f32);

    /// Returns the face-wide line extents at the current size.
    fn line_extents(&self) -> LineExtents;

    /// Loads the glyph for `code` at the current size.
    ///
    /// Returns `None` when the glyph has no scalable outline.
    fn load_glyph(&mut self, code: char) -> Option<LoadedGlyph>;
}
