// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterizes some text with Fontdeck and writes the resulting glyph pages
//! as PNG images.
//!
//! Set `RUST_LOG=debug` to see pages being created.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fontdeck::{CacheConfig, FontCache};

const DEFAULT_TEXT: &str = "The quick brown fox jumps over the lazy dog. 0123456789";

/// Writes the glyph pages of a font rendered at one size.
#[derive(Debug, Parser)]
#[command(name = "atlas_dump")]
struct Args {
    /// Font file to load.
    font: PathBuf,
    /// Characters to rasterize.
    #[arg(default_value = DEFAULT_TEXT)]
    text: String,
    /// Point size.
    #[arg(default_value_t = 24.0)]
    points: f32,
    /// Directory receiving `page<N>.png`.
    #[arg(default_value = ".")]
    out_dir: PathBuf,
    /// Side length of each page in pixels.
    #[arg(long, default_value_t = 256)]
    page_size: u16,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    // Small pages so that a short text already spans several of them
    let config = CacheConfig {
        page_size: args.page_size,
        ..CacheConfig::default()
    };
    let mut cache = FontCache::new(config);
    cache.load(args.font);

    // Measure, place and rasterize every character in a single pass
    let report = match cache.preload_bitmaps(&args.text, args.points, config.dpi) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    for glyph in &report.unplaced {
        log::warn!("{:?} at {} has no bitmap: {}", glyph.code, glyph.key, glyph.error);
    }

    match cache.write_pages(&args.out_dir) {
        Ok(written) => {
            let stats = cache.stats();
            println!(
                "placed {} of {} glyphs on {} pages",
                stats.placed, stats.glyphs, stats.pages
            );
            for path in written {
                println!("wrote {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
