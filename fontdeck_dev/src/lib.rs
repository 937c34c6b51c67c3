// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Fontdeck Dev
//!
//! This crate provides utilities for developing Fontdeck: text samples, a
//! lookup for a real font on the host, and [`BlockEngine`], a synthetic font
//! engine whose glyphs are solid boxes with predictable metrics.

use std::cell::Cell;
use std::path::PathBuf;

use fontdeck::{Error, FontEngine, FontFace, FontSource, LineExtents, LoadedGlyph, Outline};

/// Environment variable naming a font file used by tests that need real
/// outlines.
pub const TEST_FONT_VAR: &str = "FONTDECK_TEST_FONT";

/// Common locations of a Latin sans-serif font on developer machines.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Returns a font file to test against, if one can be found.
///
/// [`TEST_FONT_VAR`] takes precedence over the built-in system locations.
pub fn test_font() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(TEST_FONT_VAR) {
        let path = PathBuf::from(path);
        return path.is_file().then_some(path);
    }
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// A sample to be used for development.
#[derive(Debug)]
pub struct Sample {
    /// The name of the sample.
    pub name: &'static str,
    /// The text of the sample.
    pub text: &'static str,
}

/// A collection of text samples.
#[derive(Debug)]
pub struct TextSamples {
    /// A Latin pangram.
    pub latin: Sample,
    /// The decimal digits.
    pub digits: Sample,
    /// Printable ASCII, including the space.
    pub ascii: Sample,
}

impl TextSamples {
    /// Creates a new collection of text samples.
    pub const fn new() -> Self {
        Self {
            latin: Sample {
                name: "latin",
                text: "The quick brown fox jumps over the lazy dog.",
            },
            digits: Sample {
                name: "digits",
                text: "0123456789",
            },
            ascii: Sample {
                name: "ascii",
                text: " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~",
            },
        }
    }
}

impl Default for TextSamples {
    fn default() -> Self {
        Self::new()
    }
}

/// A font engine producing solid rectangular glyphs.
///
/// Sizes are expressed in tenths of an em. At `ppem` pixels per em, every
/// glyph box starts 1 tenth right of the pen, rises from the baseline to 7
/// tenths, and is [`BlockEngine::width_tenths`] wide. Its advance adds 2
/// tenths to the width. The face extends 8 tenths above and 2 tenths below
/// the baseline. Whitespace has no outline. With `ppem` a multiple of 10,
/// all of these are whole pixels.
///
/// Characters passed to [`BlockEngine::without`] have no outline at all, and
/// [`BlockEngine::failing`] makes every [`FontEngine::open`] call fail. The
/// engine counts how often it was opened.
#[derive(Debug, Default)]
pub struct BlockEngine {
    unsupported: Vec<char>,
    fail: bool,
    opens: Cell<usize>,
}

impl BlockEngine {
    /// Creates an engine that supports every character.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose font can never be opened.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Marks `chars` as having no scalable outline.
    pub fn without(mut self, chars: &str) -> Self {
        self.unsupported.extend(chars.chars());
        self
    }

    /// Number of successful and failed [`FontEngine::open`] calls so far.
    pub fn opens(&self) -> usize {
        self.opens.get()
    }

    /// The box width of `code`, in tenths of an em (3 to 7).
    pub fn width_tenths(code: char) -> u32 {
        3 + u32::from(code) % 5
    }
}

impl FontEngine for BlockEngine {
    type Face = BlockFace;

    fn open(&self, source: &FontSource) -> Result<BlockFace, Error> {
        self.opens.set(self.opens.get() + 1);
        if self.fail {
            return Err(Error::font_load(
                source.path(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such font"),
            ));
        }
        Ok(BlockFace {
            unsupported: self.unsupported.clone(),
            ppem: 0.0,
        })
    }
}

/// A face opened by [`BlockEngine`].
#[derive(Debug)]
pub struct BlockFace {
    unsupported: Vec<char>,
    ppem: f32,
}

impl FontFace for BlockFace {
    fn set_size(&mut self, ppem: f32) {
        self.ppem = ppem;
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "test sizes are far inside the i32 range"
    )]
    fn line_extents(&self) -> LineExtents {
        LineExtents {
            ascent: tenths(self.ppem, 8).ceil() as i32,
            descent: -tenths(self.ppem, 2).ceil() as i32,
        }
    }

    fn load_glyph(&mut self, code: char) -> Option<LoadedGlyph> {
        if self.unsupported.contains(&code) {
            return None;
        }
        let ppem = self.ppem;
        let mut outline = Outline::new();
        let width = tenths(ppem, BlockEngine::width_tenths(code));
        if !code.is_whitespace() {
            let x0 = tenths(ppem, 1);
            let x1 = x0 + width;
            let top = tenths(ppem, 7);
            outline.move_to(x0, 0.0);
            outline.line_to(x1, 0.0);
            outline.line_to(x1, top);
            outline.line_to(x0, top);
            outline.close();
        }
        Some(LoadedGlyph {
            advance_x: width + tenths(ppem, 2),
            outline,
        })
    }
}

fn tenths(ppem: f32, n: u32) -> f32 {
    ppem * n as f32 / 10.0
}
