//! Registry construction and the spot/margin fold

use std::collections::BTreeMap;

use log::warn;
use serde_json::Value;

use hermes_core::{InstrumentRegistry, MarketType};

use crate::extractor::extractor_for;

/// Build a single-market-type registry from a raw instrument list
///
/// Entries that fail extraction are dropped with a warning; partial success
/// is acceptable since markets list continuously.
pub fn build_market_registry(market_type: MarketType, raw_entries: &[Value]) -> InstrumentRegistry {
    let extract = extractor_for(market_type);
    let mut registry = InstrumentRegistry::new();
    for raw in raw_entries {
        match extract(raw, market_type) {
            Ok(instrument) => {
                registry.insert(instrument);
            }
            Err(err) => {
                warn!("dropping {market_type} instrument entry: {err}");
            }
        }
    }
    registry
}

/// Fold spot and margin registries into one
///
/// A pair listed under the same raw symbol on both sides becomes the spot
/// entry with `is_margin` set and the margin side's trading-relevant fields
/// (leverage, min/max order size) overlaid; the margin duplicate is
/// suppressed. Margin-only pairs are kept as standalone entries.
pub fn combine_spot_margin(
    spot: InstrumentRegistry,
    margin: InstrumentRegistry,
) -> InstrumentRegistry {
    let mut combined = spot;
    for (id, margin_instrument) in margin.iter() {
        match combined.get(id).cloned() {
            Some(mut merged) => {
                merged.is_margin = true;
                merged.leverage = margin_instrument.leverage;
                merged.min_order_size = margin_instrument.min_order_size;
                merged.max_order_size = margin_instrument.max_order_size;
                combined.insert(merged);
            }
            None => {
                combined.insert(margin_instrument.clone());
            }
        }
    }
    combined
}

/// Build the combined registry from per-market-type raw payload lists
///
/// Spot and margin fold into shared entries; futures and perp copy through
/// unchanged (their canonical ids never collide with the spot family).
/// The result holds exactly one entry per (raw symbol, market-type-family)
/// pair. No side effects beyond the returned registry: callers swap their
/// held reference atomically.
pub fn build_registry(raw_market_payloads: &BTreeMap<MarketType, Vec<Value>>) -> InstrumentRegistry {
    let per_market = |market_type: MarketType| {
        raw_market_payloads
            .get(&market_type)
            .map(|raw| build_market_registry(market_type, raw))
            .unwrap_or_default()
    };

    let spot = per_market(MarketType::Spot);
    let margin = per_market(MarketType::Margin);
    let futures = per_market(MarketType::Futures);
    let perp = per_market(MarketType::Perp);

    let mut combined = combine_spot_margin(spot, margin);
    for (_, instrument) in futures.iter().chain(perp.iter()) {
        combined.insert(instrument.clone());
    }
    combined
}
