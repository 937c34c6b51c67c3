// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph pages: fixed-size canvases that glyph bitmaps are packed into.
//!
//! Each [`GlyphPage`] couples an alpha [`Canvas`] with a [`ShelfAllocator`]
//! that carves out non-overlapping rectangles. Pages are append-only: a
//! granted region is never moved or reclaimed, and the canvas is only
//! allocated once the first region is granted.

mod canvas;
mod page;
mod shelf;

pub use canvas::Canvas;
pub use page::{GlyphPage, PageId};
pub use shelf::ShelfAllocator;

/// An axis-aligned rectangle of pixels within a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PageRect {
    /// Left edge (pixels).
    pub x: u16,
    /// Top edge (pixels).
    pub y: u16,
    /// Width (pixels).
    pub width: u16,
    /// Height (pixels).
    pub height: u16,
}

impl PageRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        u32::from(self.x) + u32::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        u32::from(self.y) + u32::from(self.height)
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && u32::from(self.x) < other.right()
            && u32::from(other.x) < self.right()
            && u32::from(self.y) < other.bottom()
            && u32::from(other.y) < self.bottom()
    }

    /// Whether the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= i64::from(self.x)
            && y >= i64::from(self.y)
            && x < i64::from(self.right())
            && y < i64::from(self.bottom())
    }
}
