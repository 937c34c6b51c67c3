// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph pages: a packed area plus its lazily allocated canvas.

use core::fmt;

use super::{Canvas, PageRect, ShelfAllocator};

/// Index of a page in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(pub u32);

impl PageId {
    /// Returns the index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page{}", self.0)
    }
}

/// A square canvas plus the allocator that packs glyph bitmaps into it.
#[derive(Clone, Debug)]
pub struct GlyphPage {
    id: PageId,
    size: u16,
    allocator: ShelfAllocator,
    canvas: Option<Canvas>,
}

impl GlyphPage {
    /// Creates an empty page with side length `size`. No canvas is allocated
    /// until the first region is granted.
    pub fn new(id: PageId, size: u16) -> Self {
        Self {
            id,
            size,
            allocator: ShelfAllocator::new(size, size),
            canvas: None,
        }
    }

    /// The page index in creation order.
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Side length in pixels.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// The packing state of the page.
    pub fn allocator(&self) -> &ShelfAllocator {
        &self.allocator
    }

    /// The canvas, if one has been allocated.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Returns the canvas, allocating a transparent one on first use.
    pub fn affirm_canvas(&mut self) -> &mut Canvas {
        let size = self.size;
        self.canvas.get_or_insert_with(|| Canvas::new(size, size))
    }

    /// Reserves a `width` x `height` region, allocating the canvas on
    /// success. A failed attempt leaves the page unchanged.
    pub fn try_alloc(&mut self, width: u16, height: u16) -> Option<PageRect> {
        let rect = self.allocator.try_alloc(width, height)?;
        self.affirm_canvas();
        Some(rect)
    }

    /// Encodes the canvas as an RGBA PNG: white with the canvas alpha.
    ///
    /// A page without a canvas is written fully transparent.
    #[cfg(feature = "png")]
    pub fn write_png<W: std::io::Write>(&self, writer: W) -> Result<(), crate::Error> {
        let size = u32::from(self.size);
        let mut encoder = png::Encoder::new(writer, size, size);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let pixels = usize::from(self.size) * usize::from(self.size);
        let mut rgba = Vec::with_capacity(pixels * 4);
        match &self.canvas {
            Some(canvas) => {
                for &alpha in canvas.data() {
                    rgba.extend_from_slice(&[255, 255, 255, alpha]);
                }
            }
            None => rgba.resize(pixels * 4, 0),
        }

        let mut writer = encoder
            .write_header()
            .map_err(|e| crate::Error::image_write(None, e.to_string()))?;
        writer
            .write_image_data(&rgba)
            .map_err(|e| crate::Error::image_write(None, e.to_string()))?;
        writer
            .finish()
            .map_err(|e| crate::Error::image_write(None, e.to_string()))
    }
}
