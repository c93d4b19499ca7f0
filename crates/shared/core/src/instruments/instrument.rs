use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MarketType;
use crate::values::{Price, Quantity, Rate, TimestampMs, datetime_from_ms};

/// Unique identifier for an instrument
///
/// The canonical cross-exchange key identifying one tradable instrument,
/// independent of the exchange's native symbol spelling. Stable enough to
/// be stored by callers and used as a map key without copying the full
/// instrument descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstrumentId(pub String);

impl InstrumentId {
    /// Create a new instrument ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the canonical id for an instrument
    ///
    /// Deterministic over the normalized pair and market type:
    /// - spot/margin: `BASE/QUOTE`
    /// - perp: `BASE/QUOTE:SETTLE`
    /// - futures: `BASE/QUOTE:SETTLE-EXPIRY_MS`
    ///
    /// Spot and margin intentionally share an id so the registry fold can
    /// collapse them into one entry.
    pub fn derive(
        base: &str,
        quote: &str,
        settle: &str,
        market_type: MarketType,
        expiration_time: Option<TimestampMs>,
    ) -> Self {
        match market_type {
            MarketType::Spot | MarketType::Margin => Self(format!("{}/{}", base, quote)),
            MarketType::Perp => Self(format!("{}/{}:{}", base, quote, settle)),
            MarketType::Futures => Self(format!(
                "{}/{}:{}-{}",
                base,
                quote,
                settle,
                expiration_time.unwrap_or_default()
            )),
        }
    }
}

impl std::fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Canonical trading-pair/contract descriptor
///
/// Produced in bulk by the exchange-info normalizer at registry-build time
/// and immutable thereafter. `raw_data` retains the exchange-native payload
/// losslessly so subsequent API calls can re-derive exchange-specific
/// request parameters (in particular the native symbol).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub instrument_id: InstrumentId,
    /// Base currency (the one being bought/sold)
    pub base: String,
    /// Quote currency (the one used to price the base)
    pub quote: String,
    /// Settlement currency (quote for spot/margin and linear contracts)
    pub settle: String,
    pub market_type: MarketType,
    pub is_spot: bool,
    pub is_margin: bool,
    pub is_futures: bool,
    pub is_perp: bool,
    pub is_linear: bool,
    pub is_inverse: bool,
    /// Contract size in base units (ONE for spot/margin)
    pub contract_size: Quantity,
    /// Contract multiplier (ONE for spot/margin)
    pub multiplier: Decimal,
    /// Minimum price increment
    pub tick_size: Price,
    /// Minimum order size in base units
    pub min_order_size: Quantity,
    /// Maximum order size in base units
    pub max_order_size: Quantity,
    /// Maximum leverage (ONE where the market offers none)
    pub leverage: Rate,
    /// Listing time in epoch milliseconds
    pub listing_time: TimestampMs,
    /// Expiry in epoch milliseconds (futures only)
    pub expiration_time: Option<TimestampMs>,
    /// Opaque exchange-native payload, retained for lossless round-trips
    pub raw_data: serde_json::Value,
}

impl Instrument {
    /// Market-type flags for a single-market-type entry
    ///
    /// Exactly one of the four flags is true; the spot/margin fold in the
    /// normalizer is the only step allowed to set a second one.
    pub fn flags_for(market_type: MarketType) -> (bool, bool, bool, bool) {
        (
            market_type == MarketType::Spot,
            market_type == MarketType::Margin,
            market_type == MarketType::Futures,
            market_type == MarketType::Perp,
        )
    }

    /// Whether this instrument is a derivative contract
    pub fn is_derivative(&self) -> bool {
        self.is_futures || self.is_perp
    }

    /// Expiry as a UTC datetime, if the contract has one
    pub fn expiration_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.expiration_time.and_then(datetime_from_ms)
    }

    /// Count of market-type flags currently set
    pub fn flag_count(&self) -> usize {
        [self.is_spot, self.is_margin, self.is_futures, self.is_perp]
            .iter()
            .filter(|f| **f)
            .count()
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.instrument_id, self.market_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_id() {
        let id = InstrumentId::new("BTC/USDT");
        assert_eq!(id.as_str(), "BTC/USDT");
        assert_eq!(format!("{}", id), "BTC/USDT");
    }

    #[test]
    fn test_derive_spot_and_margin_share_id() {
        let spot = InstrumentId::derive("BTC", "USDT", "USDT", MarketType::Spot, None);
        let margin = InstrumentId::derive("BTC", "USDT", "USDT", MarketType::Margin, None);
        assert_eq!(spot, margin);
        assert_eq!(spot.as_str(), "BTC/USDT");
    }

    #[test]
    fn test_derive_derivatives_are_distinct() {
        let perp = InstrumentId::derive("BTC", "USDT", "USDT", MarketType::Perp, None);
        let fut = InstrumentId::derive(
            "BTC",
            "USDT",
            "USDT",
            MarketType::Futures,
            Some(1_735_286_400_000),
        );
        assert_eq!(perp.as_str(), "BTC/USDT:USDT");
        assert_eq!(fut.as_str(), "BTC/USDT:USDT-1735286400000");
        assert_ne!(perp, fut);
    }

    #[test]
    fn test_flags_for_exactly_one() {
        for market_type in MarketType::all() {
            let (s, m, f, p) = Instrument::flags_for(market_type);
            let count = [s, m, f, p].iter().filter(|x| **x).count();
            assert_eq!(count, 1, "{market_type} must set exactly one flag");
        }
    }
}
