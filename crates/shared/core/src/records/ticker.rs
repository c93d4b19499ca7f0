use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instruments::{InstrumentId, MarketType};
use crate::values::{Price, Quantity, TimestampMs};

/// Canonical 24h ticker record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub timestamp: TimestampMs,
    pub instrument_id: InstrumentId,
    pub market_type: MarketType,
    pub last: Price,
    pub bid: Price,
    pub ask: Price,
    /// 24h volume in base units
    pub base_volume: Quantity,
    /// 24h volume in quote units
    pub quote_volume: Quantity,
    /// Opaque exchange-native payload
    pub raw_data: serde_json::Value,
}

impl Ticker {
    /// Implied price: `quote_volume / base_volume`
    ///
    /// Used as a cross-check against `last`; `None` when base volume is
    /// zero and the ratio is undefined.
    pub fn implied_price(&self) -> Option<Decimal> {
        if self.base_volume.is_zero() {
            return None;
        }
        Some(self.quote_volume / self.base_volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ticker(base_volume: Decimal, quote_volume: Decimal) -> Ticker {
        Ticker {
            timestamp: 1_700_000_000_000,
            instrument_id: InstrumentId::new("BTC/USDT"),
            market_type: MarketType::Spot,
            last: dec!(100),
            bid: dec!(99.9),
            ask: dec!(100.1),
            base_volume,
            quote_volume,
            raw_data: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_implied_price() {
        let t = ticker(dec!(10), dec!(1010));
        assert_eq!(t.implied_price(), Some(dec!(101)));
    }

    #[test]
    fn test_implied_price_zero_volume() {
        let t = ticker(dec!(0), dec!(1010));
        assert_eq!(t.implied_price(), None);
    }
}
