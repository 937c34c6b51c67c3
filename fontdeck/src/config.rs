// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cache configuration.

/// Side length, in pixels, of a glyph page.
pub const DEFAULT_PAGE_SIZE: u16 = 1024;

/// Padding in pixels added to each side of a glyph to prevent texture bleeding.
pub const DEFAULT_PADDING: u16 = 1;

/// Device resolution at which points and pixels coincide.
pub const DEFAULT_DPI: u32 = 72;

/// Configuration for a [`FontCache`](crate::FontCache).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Side length of every (square) glyph page, in pixels.
    pub page_size: u16,
    /// Transparent border reserved around each glyph bitmap, in pixels.
    pub padding: u16,
    /// Device resolution used when a call does not name one explicitly.
    pub dpi: u32,
}

impl CacheConfig {
    /// Returns the largest glyph bitmap, per side, that fits on an empty page.
    pub fn max_glyph_size(&self) -> u16 {
        self.page_size.saturating_sub(self.padding.saturating_mul(2))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            padding: DEFAULT_PADDING,
            dpi: DEFAULT_DPI,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_glyph_size_accounts_for_padding() {
        let config = CacheConfig::default();
        assert_eq!(config.max_glyph_size(), 1022);

        let tiny = CacheConfig {
            page_size: 1,
            padding: 4,
            dpi: DEFAULT_DPI,
        };
        assert_eq!(tiny.max_glyph_size(), 0);
    }
}
