// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph deck keys.

use core::fmt;

/// A point size normalized to 26.6 fixed point (1/64 of a point).
///
/// Sizes that are equal at 1/64 pt precision produce the same key regardless
/// of how the floating point value was computed, so the type can be
/// hashed and compared directly. Negative and NaN sizes normalize to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointSize(u32);

impl PointSize {
    /// The zero point size.
    pub const ZERO: Self = Self(0);

    /// Normalizes a point size given as a float.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is rounded and clamped to the u32 range before the cast"
    )]
    pub fn new(points: f32) -> Self {
        let fixed = (f64::from(points) * 64.0).round();
        if fixed.is_nan() || fixed <= 0.0 {
            Self::ZERO
        } else {
            Self(fixed.min(f64::from(u32::MAX)) as u32)
        }
    }

    /// Creates a point size from 26.6 fixed point units.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the size in 26.6 fixed point units.
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Returns the size in points.
    pub fn points(self) -> f32 {
        self.0 as f32 / 64.0
    }
}

impl From<f32> for PointSize {
    fn from(points: f32) -> Self {
        Self::new(points)
    }
}

impl fmt::Display for PointSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.points())
    }
}

/// Identifies one [`GlyphDeck`](crate::GlyphDeck): a point size rendered at
/// a device resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeckKey {
    /// The normalized point size.
    pub size: PointSize,
    /// Device resolution in dots per inch.
    pub dpi: u32,
}

impl DeckKey {
    /// Creates a key for `points` at `dpi`.
    pub fn new(points: f32, dpi: u32) -> Self {
        Self {
            size: PointSize::new(points),
            dpi,
        }
    }

    /// Returns the size in pixels per em.
    pub fn pixels_per_em(self) -> f32 {
        self.size.points() * self.dpi as f32 / 72.0
    }
}

impl fmt::Display for DeckKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}dpi", self.size, self.dpi)
    }
}
