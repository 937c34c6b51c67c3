// Copyright 2026 the Fontdeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The glyphs cached for one point size.

use hashbrown::HashMap;

use crate::engine::LineExtents;
use crate::glyph::{GlyphRecord, GlyphState};
use crate::key::DeckKey;

/// The set of glyph records for one [`DeckKey`].
///
/// Records are stored in creation order and never removed. The pending queue
/// holds indices of records waiting for the next update pass; a record is in
/// the queue at most once.
#[derive(Clone, Debug)]
pub struct GlyphDeck {
    key: DeckKey,
    records: Vec<GlyphRecord>,
    index: HashMap<char, u32>,
    pending: Vec<u32>,
    line: Option<LineExtents>,
}

impl GlyphDeck {
    pub(crate) fn new(key: DeckKey) -> Self {
        Self {
            key,
            records: Vec::new(),
            index: HashMap::new(),
            pending: Vec::new(),
            line: None,
        }
    }

    /// The key this deck was created for.
    pub fn key(&self) -> DeckKey {
        self.key
    }

    /// The point size of this deck.
    pub fn points(&self) -> f32 {
        self.key.size.points()
    }

    /// Number of records in the deck.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the deck holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up the record for `code`.
    pub fn get(&self, code: char) -> Option<&GlyphRecord> {
        let slot = *self.index.get(&code)?;
        self.records.get(slot as usize)
    }

    /// Iterates over all records in creation order.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphRecord> + '_ {
        self.records.iter()
    }

    /// Iterates over the characters queued for the next update pass, in
    /// queue order.
    pub fn pending(&self) -> impl Iterator<Item = char> + '_ {
        self.pending
            .iter()
            .filter_map(|&slot| self.records.get(slot as usize))
            .map(GlyphRecord::code)
    }

    /// Number of records queued for the next update pass.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Face line extents used by the last update pass over this deck.
    pub fn line_extents(&self) -> Option<LineExtents> {
        self.line
    }

    /// Returns the slot for `code`, creating and queueing a record if the
    /// deck has none.
    pub(crate) fn affirm(&mut self, code: char) -> u32 {
        if let Some(&slot) = self.index.get(&code) {
            return slot;
        }
        let slot = u32::try_from(self.records.len()).unwrap_or(u32::MAX);
        let mut record = GlyphRecord::new(code);
        record.set_queued(true);
        self.records.push(record);
        self.index.insert(code, slot);
        self.pending.push(slot);
        slot
    }

    /// Like [`GlyphDeck::affirm`], returning the record itself.
    pub(crate) fn affirm_record(&mut self, code: char) -> &GlyphRecord {
        let slot = self.affirm(code) as usize;
        &self.records[slot]
    }

    pub(crate) fn record(&self, slot: u32) -> Option<&GlyphRecord> {
        self.records.get(slot as usize)
    }

    pub(crate) fn record_mut(&mut self, slot: u32) -> Option<&mut GlyphRecord> {
        self.records.get_mut(slot as usize)
    }

    pub(crate) fn slot(&self, code: char) -> Option<u32> {
        self.index.get(&code).copied()
    }

    /// Empties the pending queue, returning the drained slots in queue order.
    pub(crate) fn take_pending(&mut self) -> Vec<u32> {
        let pending = core::mem::take(&mut self.pending);
        for &slot in &pending {
            if let Some(record) = self.records.get_mut(slot as usize) {
                record.set_queued(false);
            }
        }
        pending
    }

    /// Queues every measured record that has no bitmap yet.
    ///
    /// Returns the number of records queued.
    pub(crate) fn requeue_unplaced(&mut self) -> usize {
        let mut queued = 0;
        for (slot, record) in self.records.iter_mut().enumerate() {
            if record.is_queued() || record.state() != GlyphState::Measured {
                continue;
            }
            let Ok(slot) = u32::try_from(slot) else {
                break;
            };
            record.set_queued(true);
            self.pending.push(slot);
            queued += 1;
        }
        queued
    }

    pub(crate) fn set_line_extents(&mut self, line: LineExtents) {
        self.line = Some(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphMetrics;

    fn deck() -> GlyphDeck {
        GlyphDeck::new(DeckKey::new(12.0, 72))
    }

    #[test]
    fn affirm_is_idempotent() {
        let mut deck = deck();
        let a = deck.affirm('a');
        let b = deck.affirm('b');
        assert_eq!(deck.affirm('a'), a);
        assert_ne!(a, b);
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.pending().collect::<Vec<_>>(), vec!['a', 'b']);
    }

    #[test]
    fn take_pending_clears_queue_flags() {
        let mut deck = deck();
        deck.affirm('x');
        deck.affirm('y');
        assert!(deck.get('x').is_some_and(GlyphRecord::is_queued));

        let drained = deck.take_pending();
        assert_eq!(drained.len(), 2);
        assert_eq!(deck.pending_len(), 0);
        assert!(deck.glyphs().all(|g| !g.is_queued()));

        // Affirming an existing record after the pass does not queue it again.
        deck.affirm('x');
        assert_eq!(deck.pending_len(), 0);
    }

    #[test]
    fn requeue_only_picks_measured_records() {
        let mut deck = deck();
        let a = deck.affirm('a');
        let b = deck.affirm('b');
        let c = deck.affirm('c');
        deck.take_pending();

        if let Some(record) = deck.record_mut(a) {
            record.set_metrics(GlyphMetrics::default());
        }
        if let Some(record) = deck.record_mut(b) {
            record.set_state(GlyphState::Unsupported);
        }
        assert_eq!(deck.record(c).map(GlyphRecord::state), Some(GlyphState::Pending));

        assert_eq!(deck.requeue_unplaced(), 1);
        assert_eq!(deck.pending().collect::<Vec<_>>(), vec!['a']);
        // A second call does not queue the record twice.
        assert_eq!(deck.requeue_unplaced(), 0);
    }
}
