// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use fontdeck::{CacheConfig, FontCache};
use fontdeck_dev::BlockEngine;

/// Font path handed to [`BlockEngine`], which never reads it.
pub(crate) const BLOCK_FONT: &str = "block.ttf";

/// A cache backed by [`BlockEngine`] plus a per-test scratch directory.
pub(crate) struct TestEnv {
    name: &'static str,
    pub(crate) cache: FontCache<BlockEngine>,
}

impl TestEnv {
    pub(crate) fn new(name: &'static str) -> Self {
        Self::with_engine(name, BlockEngine::new(), CacheConfig::default())
    }

    pub(crate) fn with_config(name: &'static str, config: CacheConfig) -> Self {
        Self::with_engine(name, BlockEngine::new(), config)
    }

    pub(crate) fn with_engine(
        name: &'static str,
        engine: BlockEngine,
        config: CacheConfig,
    ) -> Self {
        let mut cache = FontCache::with_engine(engine, config);
        cache.load(BLOCK_FONT);
        Self { name, cache }
    }

    /// Number of times the font was opened so far.
    pub(crate) fn opens(&self) -> usize {
        self.cache.engine().opens()
    }

    /// Returns an empty directory reserved for this test.
    pub(crate) fn out_dir(&self) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "fontdeck-tests-{}-{}",
            std::process::id(),
            self.name
        ));
        if dir.exists() {
            std::fs::remove_dir_all(&dir).unwrap();
        }
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
