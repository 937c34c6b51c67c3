// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelf packing.

use super::PageRect;

/// Packs rectangles into a fixed area using horizontal shelves.
///
/// Rectangles are placed left to right on the current shelf. When a
/// rectangle does not fit in the remaining width, a new shelf is opened
/// directly below the tallest rectangle of the current one. Placement is a
/// pure function of the sequence of requests, and a failed request leaves
/// the allocator untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShelfAllocator {
    width: u16,
    height: u16,
    /// Top of the current shelf.
    shelf_y: u16,
    /// Height of the tallest rectangle on the current shelf.
    shelf_height: u16,
    /// Next free x position on the current shelf.
    cursor_x: u16,
    /// Number of rectangles granted so far.
    count: u32,
}

impl ShelfAllocator {
    /// Creates an empty allocator covering `width` x `height` pixels.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            shelf_y: 0,
            shelf_height: 0,
            cursor_x: 0,
            count: 0,
        }
    }

    /// Width of the packed area.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height of the packed area.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of rectangles granted so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether nothing has been granted yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Height of the area used so far, from the top edge.
    pub fn used_height(&self) -> u16 {
        self.shelf_y.saturating_add(self.shelf_height)
    }

    /// Reserves a `width` x `height` rectangle, or returns `None` when the
    /// remaining space cannot hold it.
    pub fn try_alloc(&mut self, width: u16, height: u16) -> Option<PageRect> {
        if width > self.width || height > self.height {
            return None;
        }
        let (x, y, shelf_y, shelf_height) = if self.fits(self.cursor_x, self.shelf_y, width, height)
        {
            (
                self.cursor_x,
                self.shelf_y,
                self.shelf_y,
                self.shelf_height.max(height),
            )
        } else {
            let next_y = self.used_height();
            if !self.fits(0, next_y, width, height) {
                return None;
            }
            (0, next_y, next_y, height)
        };

        self.shelf_y = shelf_y;
        self.shelf_height = shelf_height;
        self.cursor_x = x + width;
        self.count += 1;
        Some(PageRect {
            x,
            y,
            width,
            height,
        })
    }

    fn fits(&self, x: u16, y: u16, width: u16, height: u16) -> bool {
        u32::from(x) + u32::from(width) <= u32::from(self.width)
            && u32::from(y) + u32::from(height) <= u32::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_shelf_left_to_right() {
        let mut shelf = ShelfAllocator::new(100, 100);
        let a = shelf.try_alloc(30, 10).unwrap();
        let b = shelf.try_alloc(30, 20).unwrap();
        let c = shelf.try_alloc(40, 5).unwrap();
        assert_eq!((a.x, a.y), (0, 0));
        assert_eq!((b.x, b.y), (30, 0));
        assert_eq!((c.x, c.y), (60, 0));
        assert_eq!(shelf.used_height(), 20);
    }

    #[test]
    fn opens_new_shelf_below_tallest() {
        let mut shelf = ShelfAllocator::new(100, 100);
        shelf.try_alloc(60, 10).unwrap();
        shelf.try_alloc(30, 25).unwrap();
        let next = shelf.try_alloc(20, 10).unwrap();
        assert_eq!((next.x, next.y), (0, 25));
    }

    #[test]
    fn failure_does_not_mutate() {
        let mut shelf = ShelfAllocator::new(64, 32);
        shelf.try_alloc(40, 20).unwrap();
        let before = shelf.clone();
        assert!(shelf.try_alloc(40, 20).is_none());
        assert!(shelf.try_alloc(65, 1).is_none());
        assert_eq!(shelf, before);

        // Space left on the current shelf is still usable.
        let rest = shelf.try_alloc(24, 20).unwrap();
        assert_eq!((rest.x, rest.y), (40, 0));
    }

    #[test]
    fn exact_fit_uses_whole_area() {
        let mut shelf = ShelfAllocator::new(16, 16);
        assert!(shelf.try_alloc(16, 16).is_some());
        assert!(shelf.try_alloc(1, 1).is_none());
        assert_eq!(shelf.count(), 1);
    }

    #[test]
    fn granted_rects_never_overlap() {
        let mut shelf = ShelfAllocator::new(128, 128);
        let mut granted = Vec::new();
        // Deterministic mix of sizes.
        for i in 0..200_u16 {
            let w = 3 + (i * 7) % 23;
            let h = 4 + (i * 5) % 19;
            if let Some(rect) = shelf.try_alloc(w, h) {
                granted.push(rect);
            }
        }
        assert!(granted.len() > 10, "expected a reasonable number of placements");
        for (i, a) in granted.iter().enumerate() {
            assert!(a.right() <= 128 && a.bottom() <= 128, "{a:?} out of bounds");
            for b in &granted[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}
