use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Instrument, InstrumentId, MarketType};

/// Combined instrument registry, keyed by canonical instrument id
///
/// Built once by the normalizer, covering all market types, then shared
/// read-only. Rebuilding produces a fresh registry value; holders swap
/// references rather than mutating in place, so in-flight readers never
/// observe a partially-rebuilt registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRegistry {
    entries: BTreeMap<InstrumentId, Instrument>,
}

impl InstrumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from pre-normalized instruments
    ///
    /// Later entries win on id collision; the normalizer relies on this for
    /// the market-type fold order.
    pub fn from_entries(entries: impl IntoIterator<Item = Instrument>) -> Self {
        let mut registry = Self::new();
        for instrument in entries {
            registry.insert(instrument);
        }
        registry
    }

    /// Insert an instrument, returning the previous entry under that id
    pub fn insert(&mut self, instrument: Instrument) -> Option<Instrument> {
        self.entries
            .insert(instrument.instrument_id.clone(), instrument)
    }

    /// Look up an instrument by canonical id
    pub fn get(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &InstrumentId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate all entries in canonical-id order
    pub fn iter(&self) -> impl Iterator<Item = (&InstrumentId, &Instrument)> {
        self.entries.iter()
    }

    /// Iterate instruments carrying the flag for a market type
    ///
    /// Uses the flags rather than `market_type` so a merged spot entry with
    /// `is_margin = true` shows up under both spot and margin.
    pub fn instruments_of(&self, market_type: MarketType) -> impl Iterator<Item = &Instrument> {
        self.entries.values().filter(move |i| match market_type {
            MarketType::Spot => i.is_spot,
            MarketType::Margin => i.is_margin,
            MarketType::Futures => i.is_futures,
            MarketType::Perp => i.is_perp,
        })
    }

    /// All canonical ids, in order
    pub fn ids(&self) -> impl Iterator<Item = &InstrumentId> {
        self.entries.keys()
    }
}
