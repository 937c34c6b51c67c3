// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph records and their page placements.

use crate::atlas::{PageId, PageRect};

/// Pixel metrics of a glyph at a deck's size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Width of the glyph bitmap.
    pub width: f32,
    /// Line height shared by every glyph of the deck.
    pub height: f32,
    /// Horizontal pen advance.
    pub advance_x: f32,
    /// Offset from the pen position to the left edge of the bitmap.
    pub bearing_x: f32,
}

/// Location of a glyph bitmap within a [`GlyphPage`](crate::GlyphPage).
///
/// The rectangle excludes the padding reserved around the glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Page holding the bitmap.
    pub page: PageId,
    /// X position in the page (pixels).
    pub src_x: u16,
    /// Y position in the page (pixels).
    pub src_y: u16,
    /// Width of the bitmap (pixels).
    pub width: u16,
    /// Height of the bitmap (pixels).
    pub height: u16,
}

impl Placement {
    /// Returns the rectangle covered by the bitmap.
    pub fn rect(&self) -> PageRect {
        PageRect {
            x: self.src_x,
            y: self.src_y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Progress of a glyph through the update passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlyphState {
    /// Waiting for the next update pass; metrics are not valid yet.
    #[default]
    Pending,
    /// Metrics are valid; no bitmap has been placed.
    Measured,
    /// Metrics are valid and the bitmap is stored in a page.
    Placed,
    /// Metrics are valid and the glyph has no ink (e.g. a space), so it never
    /// needs a bitmap.
    Blank,
    /// The font has no scalable outline for this glyph; metrics stay at zero.
    Unsupported,
    /// Metrics are valid but the bitmap could not fit on an empty page.
    TooLarge,
}

/// One character's metrics and, once rasterized, its page placement.
#[derive(Clone, Debug)]
pub struct GlyphRecord {
    code: char,
    metrics: GlyphMetrics,
    placement: Option<Placement>,
    state: GlyphState,
    queued: bool,
}

impl GlyphRecord {
    pub(crate) fn new(code: char) -> Self {
        Self {
            code,
            metrics: GlyphMetrics::default(),
            placement: None,
            state: GlyphState::Pending,
            queued: false,
        }
    }

    /// The character this record stores.
    pub fn code(&self) -> char {
        self.code
    }

    /// Pixel metrics; all zero until an update pass has processed the glyph.
    pub fn metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    /// Width of the glyph bitmap in pixels.
    pub fn width(&self) -> f32 {
        self.metrics.width
    }

    /// Line height in pixels, shared across the deck.
    pub fn height(&self) -> f32 {
        self.metrics.height
    }

    /// Horizontal advance in pixels.
    pub fn advance_x(&self) -> f32 {
        self.metrics.advance_x
    }

    /// Horizontal bearing in pixels.
    pub fn bearing_x(&self) -> f32 {
        self.metrics.bearing_x
    }

    /// Where the bitmap lives, if it has been rasterized into a page.
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Progress of this glyph through the update passes.
    pub fn state(&self) -> GlyphState {
        self.state
    }

    /// Whether the glyph is queued for the next update pass.
    pub fn is_queued(&self) -> bool {
        self.queued
    }

    pub(crate) fn set_queued(&mut self, queued: bool) {
        self.queued = queued;
    }

    pub(crate) fn set_metrics(&mut self, metrics: GlyphMetrics) {
        self.metrics = metrics;
        if self.placement.is_none() {
            self.state = GlyphState::Measured;
        }
    }

    pub(crate) fn set_placement(&mut self, placement: Placement) {
        self.placement = Some(placement);
        self.state = GlyphState::Placed;
    }

    pub(crate) fn set_state(&mut self, state: GlyphState) {
        self.state = state;
    }
}
