use serde::{Deserialize, Serialize};

use crate::instruments::{InstrumentId, MarketType};
use crate::values::{Price, Quantity, TimestampMs};

/// Canonical candlestick record
///
/// Invariant (checked by the validation layer, not the parser):
/// `low <= {open, close} <= high`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    /// Bar open time in exchange-native epoch milliseconds
    pub timestamp: TimestampMs,
    pub instrument_id: InstrumentId,
    pub market_type: MarketType,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    /// Volume in base units
    pub base_volume: Quantity,
    /// Volume in quote units
    pub quote_volume: Quantity,
    /// Opaque exchange-native payload
    pub raw_data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kline_serde_round_trip() {
        let kline = Kline {
            timestamp: 1_700_000_000_000,
            instrument_id: InstrumentId::new("BTC/USDT"),
            market_type: MarketType::Spot,
            open: dec!(100),
            high: dec!(110),
            low: dec!(95),
            close: dec!(105),
            base_volume: dec!(12.5),
            quote_volume: dec!(1300),
            raw_data: serde_json::json!(["1700000000000", "100", "110", "95", "105"]),
        };

        let json = serde_json::to_string(&kline).unwrap();
        let back: Kline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kline);
    }
}
