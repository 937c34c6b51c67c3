// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use fontdeck::{FontCache, FontEngine};

use super::placements;

/// Asserts that no two placements on the same page intersect, and that every
/// placement lies on an existing page.
pub(crate) fn assert_no_overlap<E: FontEngine>(cache: &FontCache<E>) {
    let placements = placements(cache);
    for (i, a) in placements.iter().enumerate() {
        let page = cache
            .page(a.page)
            .unwrap_or_else(|| panic!("placement {a:?} refers to a missing page"));
        let size = u32::from(page.size());
        assert!(
            a.rect().right() <= size && a.rect().bottom() <= size,
            "placement {a:?} extends past {}",
            a.page
        );
        for b in &placements[i + 1..] {
            if a.page == b.page {
                assert!(
                    !a.rect().intersects(&b.rect()),
                    "placements {a:?} and {b:?} overlap"
                );
            }
        }
    }
}

/// Asserts that every painted pixel lies inside a placement of its page and
/// that every placement received some ink.
pub(crate) fn assert_ink_inside_placements<E: FontEngine>(cache: &FontCache<E>) {
    let placements = placements(cache);
    for page in cache.pages() {
        let canvas = page
            .canvas()
            .unwrap_or_else(|| panic!("{} has placements but no canvas", page.id()));
        let on_page: Vec<_> = placements.iter().filter(|p| p.page == page.id()).collect();
        for (y, row) in canvas.rows().enumerate() {
            for (x, &alpha) in row.iter().enumerate() {
                if alpha == 0 {
                    continue;
                }
                let (x, y) = (x as i64, y as i64);
                assert!(
                    on_page.iter().any(|p| p.rect().contains(x, y)),
                    "ink at ({x}, {y}) on {} is outside every placement",
                    page.id()
                );
            }
        }
        for placement in on_page {
            let rect = placement.rect();
            let inked = (rect.y..rect.y + rect.height).any(|y| {
                (rect.x..rect.x + rect.width)
                    .any(|x| canvas.pixel(i64::from(x), i64::from(y)).is_some_and(|a| a > 0))
            });
            assert!(inked, "placement {placement:?} has no ink");
        }
    }
}
