// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha canvases backing glyph pages.

/// A single-channel (alpha) image with top-down rows.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            data: vec![0; usize::from(width) * usize::from(height)],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The raw alpha values, one byte per pixel, row by row.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the alpha at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i64, y: i64) -> Option<u8> {
        self.offset(x, y).map(|i| self.data[i])
    }

    /// Stores `alpha` at `(x, y)`.
    ///
    /// Coordinates outside the canvas are ignored; returns whether the pixel
    /// was written.
    pub fn set_pixel(&mut self, x: i64, y: i64, alpha: u8) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.data[i] = alpha;
                true
            }
            None => false,
        }
    }

    /// Returns the rows of `width` alpha values each.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(usize::from(self.width.max(1)))
    }

    /// Whether any pixel is non-transparent.
    pub fn has_ink(&self) -> bool {
        self.data.iter().any(|&a| a != 0)
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        Some(y * usize::from(self.width) + x)
    }
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
