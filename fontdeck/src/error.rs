// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::{Path, PathBuf};

/// Error type for font cache operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus whatever context applies to
/// the failure: the font path, the rejected glyph dimensions, or the
/// underlying cause.
#[derive(Debug)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The font file involved, when the error concerns one.
    path: Option<PathBuf>,

    /// Requested glyph bitmap size and the page side, for allocation errors.
    extent: Option<Extent>,

    /// Human readable detail from the failing collaborator.
    detail: Option<String>,

    /// The underlying I/O error, when there is one.
    source: Option<std::io::Error>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Extent {
    width: u16,
    height: u16,
    page_size: u16,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The font file involved in the failure, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The `(width, height)` of the glyph bitmap that could not be placed.
    pub fn glyph_size(&self) -> Option<(u16, u16)> {
        self.extent.map(|e| (e.width, e.height))
    }

    /// Creates an error for a font update pass that has no font bound.
    pub fn no_font() -> Self {
        Self::new(ErrorKind::NoFont)
    }

    /// Creates an error for a font file that could not be read.
    pub fn font_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: Some(path.into()),
            source: Some(source),
            ..Self::new(ErrorKind::FontLoad)
        }
    }

    /// Creates an error for font data that could not be parsed.
    pub fn font_parse(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            detail: Some(detail.into()),
            ..Self::new(ErrorKind::FontParse)
        }
    }

    /// Creates an error for a glyph bitmap that cannot fit on an empty page.
    pub fn glyph_too_large(width: u16, height: u16, page_size: u16) -> Self {
        Self {
            extent: Some(Extent {
                width,
                height,
                page_size,
            }),
            ..Self::new(ErrorKind::GlyphTooLarge)
        }
    }

    /// Creates an error for a glyph that has not been requested or measured.
    pub fn unknown_glyph(code: char) -> Self {
        Self {
            detail: Some(format!("{code:?}")),
            ..Self::new(ErrorKind::UnknownGlyph)
        }
    }

    /// Creates an error for a page image that could not be written.
    pub fn image_write(path: Option<PathBuf>, detail: impl Into<String>) -> Self {
        Self {
            path,
            detail: Some(detail.into()),
            ..Self::new(ErrorKind::ImageWrite)
        }
    }

    pub(crate) fn with_io_source(mut self, source: std::io::Error) -> Self {
        self.source = Some(source);
        self
    }

    pub(crate) fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: None,
            extent: None,
            detail: None,
            source: None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let path = self
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".into());
        match self.kind {
            ErrorKind::NoFont => write!(f, "no font has been loaded"),
            ErrorKind::FontLoad => match &self.source {
                Some(err) => write!(f, "error loading font {path}: {err}"),
                None => write!(f, "error loading font {path}"),
            },
            ErrorKind::FontParse => match &self.detail {
                Some(detail) => write!(f, "error parsing font {path}: {detail}"),
                None => write!(f, "error parsing font {path}"),
            },
            ErrorKind::GlyphTooLarge => match self.extent {
                Some(e) => write!(
                    f,
                    "glyph bitmap {}x{} does not fit on a {}x{} page",
                    e.width, e.height, e.page_size, e.page_size
                ),
                None => write!(f, "glyph bitmap does not fit on an empty page"),
            },
            ErrorKind::UnknownGlyph => match &self.detail {
                Some(code) => write!(f, "glyph {code} has no measured bitmap at this size"),
                None => write!(f, "glyph has no measured bitmap at this size"),
            },
            ErrorKind::ImageWrite => match (&self.detail, &self.source) {
                (Some(detail), Some(err)) => {
                    write!(f, "error writing page image {path}: {detail}: {err}")
                }
                (Some(detail), None) => write!(f, "error writing page image {path}: {detail}"),
                (None, _) => write!(f, "error writing page image {path}"),
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An update pass had pending glyphs but no font was loaded.
    NoFont,

    /// The font file could not be read.
    FontLoad,

    /// The font file was read but is not a usable font.
    FontParse,

    /// A glyph bitmap is larger than an empty page can hold.
    GlyphTooLarge,

    /// The glyph has not been requested and measured at the requested size.
    UnknownGlyph,

    /// A page canvas could not be encoded or written.
    ImageWrite,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn font_load_keeps_path_and_source() {
        let err = Error::font_load(
            "missing.ttf",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.kind(), ErrorKind::FontLoad);
        assert_eq!(err.path(), Some(Path::new("missing.ttf")));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "error loading font missing.ttf: not found");
    }

    #[test]
    fn glyph_too_large_reports_dimensions() {
        let err = Error::glyph_too_large(300, 40, 256);
        assert_eq!(err.kind(), ErrorKind::GlyphTooLarge);
        assert_eq!(err.glyph_size(), Some((300, 40)));
        assert_eq!(
            err.to_string(),
            "glyph bitmap 300x40 does not fit on a 256x256 page"
        );
        assert!(err.source().is_none());
    }
}
