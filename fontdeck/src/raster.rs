// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline rasterization and span painting.
//!
//! Outlines are rasterized by `zeno` into an alpha mask, which is then
//! replayed one scanline at a time as [`CoverageSpan`]s. Scanlines are
//! numbered bottom-up from the baseline (scanline `0` covers the pixel row
//! just above the baseline), matching the outline's y-up coordinates.
//! [`SpanPainter`] turns those spans into writes on a top-down [`Canvas`].

use smallvec::SmallVec;
use zeno::{Command, Format, Mask, Origin, Vector};

use crate::atlas::{Canvas, PageRect};

/// A run of pixels on one scanline sharing a coverage value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverageSpan {
    /// Horizontal start of the run, relative to the outline origin.
    pub x: i32,
    /// Number of pixels in the run.
    pub len: u16,
    /// Antialiasing coverage in `0..=255`.
    pub coverage: u8,
}

/// A glyph outline in pixel units with y pointing up.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    commands: Vec<Command>,
    bounds: Option<[f32; 4]>,
}

impl Outline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.bounds = None;
    }

    /// Whether the outline has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The path commands.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Control-point bounds as `[x_min, y_min, x_max, y_max]`.
    pub fn bounds(&self) -> Option<[f32; 4]> {
        self.bounds
    }

    /// Starts a new contour at `(x, y)`.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.extend(x, y);
        self.commands.push(Command::MoveTo(Vector::new(x, y)));
    }

    /// Adds a line to `(x, y)`.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.extend(x, y);
        self.commands.push(Command::LineTo(Vector::new(x, y)));
    }

    /// Adds a quadratic curve through control point `(cx, cy)` to `(x, y)`.
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.extend(cx, cy);
        self.extend(x, y);
        self.commands
            .push(Command::QuadTo(Vector::new(cx, cy), Vector::new(x, y)));
    }

    /// Adds a cubic curve through `(cx0, cy0)` and `(cx1, cy1)` to `(x, y)`.
    pub fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.extend(cx0, cy0);
        self.extend(cx1, cy1);
        self.extend(x, y);
        self.commands.push(Command::CurveTo(
            Vector::new(cx0, cy0),
            Vector::new(cx1, cy1),
            Vector::new(x, y),
        ));
    }

    /// Closes the current contour.
    pub fn close(&mut self) {
        self.commands.push(Command::Close);
    }

    /// Rasterizes the outline, calling `emit` once per non-empty scanline
    /// with the scanline number and its spans, top scanline first.
    pub fn rasterize(&self, mut emit: impl FnMut(i32, &[CoverageSpan])) {
        if self.commands.is_empty() {
            return;
        }
        let (mask, placement) = Mask::new(&self.commands[..])
            .format(Format::Alpha)
            .origin(Origin::BottomLeft)
            .render();
        let width = placement.width as usize;
        if width == 0 {
            return;
        }
        // Mask rows run top-down while `placement.top` is the bottom edge.
        let height = i32::try_from(placement.height).unwrap_or(i32::MAX);
        let top_scanline = placement.top.saturating_add(height) - 1;
        let mut spans: SmallVec<[CoverageSpan; 16]> = SmallVec::new();
        for (row, line) in mask.chunks_exact(width).enumerate() {
            spans.clear();
            let mut start = 0;
            while start < line.len() {
                let coverage = line[start];
                let mut end = start + 1;
                while end < line.len()
                    && line[end] == coverage
                    && end - start < usize::from(u16::MAX)
                {
                    end += 1;
                }
                if coverage != 0 {
                    spans.push(CoverageSpan {
                        x: placement.left + to_i32(start),
                        len: u16::try_from(end - start).unwrap_or(u16::MAX),
                        coverage,
                    });
                }
                start = end;
            }
            if !spans.is_empty() {
                emit(top_scanline - to_i32(row), &spans);
            }
        }
    }

    fn extend(&mut self, x: f32, y: f32) {
        self.bounds = Some(match self.bounds {
            Some([x0, y0, x1, y1]) => [x0.min(x), y0.min(y), x1.max(x), y1.max(y)],
            None => [x, y, x, y],
        });
    }
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Writes coverage spans into a canvas relative to a pen position.
///
/// A span on scanline `y` starting at `x` lands on canvas row
/// `pen_y - y - 1`, columns `pen_x + x ..`. Pixels outside the clip
/// rectangle (or the canvas) are dropped.
#[derive(Debug)]
pub struct SpanPainter<'a> {
    canvas: &'a mut Canvas,
    pen_x: i64,
    pen_y: i64,
    clip: PageRect,
}

impl<'a> SpanPainter<'a> {
    /// Creates a painter that may write anywhere on `canvas`.
    pub fn new(canvas: &'a mut Canvas, pen_x: i32, pen_y: i32) -> Self {
        let clip = PageRect {
            x: 0,
            y: 0,
            width: canvas.width(),
            height: canvas.height(),
        };
        Self::with_clip(canvas, pen_x, pen_y, clip)
    }

    /// Creates a painter restricted to `clip`.
    pub fn with_clip(canvas: &'a mut Canvas, pen_x: i32, pen_y: i32, clip: PageRect) -> Self {
        Self {
            canvas,
            pen_x: i64::from(pen_x),
            pen_y: i64::from(pen_y),
            clip,
        }
    }

    /// Paints the spans of one scanline. Returns the number of pixels written.
    pub fn paint(&mut self, scanline: i32, spans: &[CoverageSpan]) -> usize {
        let line = self.pen_y - i64::from(scanline) - 1;
        let mut written = 0;
        for span in spans {
            let x = self.pen_x + i64::from(span.x);
            for j in 0..i64::from(span.len) {
                if self.clip.contains(x + j, line)
                    && self.canvas.set_pixel(x + j, line, span.coverage)
                {
                    written += 1;
                }
            }
        }
        written
    }
}
