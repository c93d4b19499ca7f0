//! Business-rule validation for canonical records
//!
//! Parsers only guarantee structural completeness; the checks here catch
//! semantically broken data (a parsing bug or an exchange-side anomaly)
//! after a record has been built. A violation is reported, never silently
//! dropped.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::records::{Kline, Ticker};
use crate::values::{Price, TimestampMs};

/// Maximum allowed relative deviation between a ticker's implied price
/// (`quote_volume / base_volume`) and its reported last price: 5%.
pub const IMPLIED_PRICE_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// A structurally valid record failed a business invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error(
        "kline at {timestamp} violates OHLC ordering: open={open} high={high} low={low} close={close}"
    )]
    OhlcOrder {
        timestamp: TimestampMs,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
    },

    #[error(
        "ticker at {timestamp} implied price {implied} deviates from last {last} beyond tolerance"
    )]
    ImpliedPriceDeviation {
        timestamp: TimestampMs,
        implied: Decimal,
        last: Price,
    },
}

/// Check the OHLC ordering invariant: `low <= {open, close} <= high`
pub fn validate_kline(kline: &Kline) -> Result<(), ValidationError> {
    let ordered = kline.low <= kline.high
        && kline.low <= kline.open
        && kline.low <= kline.close
        && kline.open <= kline.high
        && kline.close <= kline.high;
    if ordered {
        Ok(())
    } else {
        Err(ValidationError::OhlcOrder {
            timestamp: kline.timestamp,
            open: kline.open,
            high: kline.high,
            low: kline.low,
            close: kline.close,
        })
    }
}

/// Check the implied-price sanity invariant
///
/// The implied price must not deviate from `last` by more than
/// [`IMPLIED_PRICE_TOLERANCE`]. Skipped when base volume is zero or the
/// last price is non-positive (ratio undefined).
pub fn validate_ticker(ticker: &Ticker) -> Result<(), ValidationError> {
    let Some(implied) = ticker.implied_price() else {
        return Ok(());
    };
    if ticker.last <= Decimal::ZERO {
        return Ok(());
    }
    let deviation = ((implied - ticker.last) / ticker.last).abs();
    if deviation > IMPLIED_PRICE_TOLERANCE {
        return Err(ValidationError::ImpliedPriceDeviation {
            timestamp: ticker.timestamp,
            implied,
            last: ticker.last,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{InstrumentId, MarketType};
    use rust_decimal_macros::dec;

    fn kline(open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Kline {
        Kline {
            timestamp: 1_700_000_000_000,
            instrument_id: InstrumentId::new("BTC/USDT"),
            market_type: MarketType::Spot,
            open,
            high,
            low,
            close,
            base_volume: dec!(1),
            quote_volume: dec!(100),
            raw_data: serde_json::Value::Null,
        }
    }

    fn ticker(last: Decimal, base_volume: Decimal, quote_volume: Decimal) -> Ticker {
        Ticker {
            timestamp: 1_700_000_000_000,
            instrument_id: InstrumentId::new("BTC/USDT"),
            market_type: MarketType::Spot,
            last,
            bid: last,
            ask: last,
            base_volume,
            quote_volume,
            raw_data: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_tolerance_constant_is_five_percent() {
        assert_eq!(IMPLIED_PRICE_TOLERANCE, dec!(0.05));
    }

    #[test]
    fn test_valid_kline() {
        assert!(validate_kline(&kline(dec!(100), dec!(110), dec!(95), dec!(105))).is_ok());
        // flat bar
        assert!(validate_kline(&kline(dec!(100), dec!(100), dec!(100), dec!(100))).is_ok());
    }

    #[test]
    fn test_high_below_low_rejected() {
        let err = validate_kline(&kline(dec!(100), dec!(90), dec!(95), dec!(100))).unwrap_err();
        assert!(matches!(err, ValidationError::OhlcOrder { .. }));
    }

    #[test]
    fn test_open_above_high_rejected() {
        assert!(validate_kline(&kline(dec!(120), dec!(110), dec!(95), dec!(105))).is_err());
    }

    #[test]
    fn test_close_below_low_rejected() {
        assert!(validate_kline(&kline(dec!(100), dec!(110), dec!(95), dec!(90))).is_err());
    }

    #[test]
    fn test_ticker_within_tolerance() {
        // implied = 104, last = 100 -> 4% deviation
        assert!(validate_ticker(&ticker(dec!(100), dec!(10), dec!(1040))).is_ok());
    }

    #[test]
    fn test_ticker_beyond_tolerance() {
        // implied = 110, last = 100 -> 10% deviation
        let err = validate_ticker(&ticker(dec!(100), dec!(10), dec!(1100))).unwrap_err();
        assert!(matches!(err, ValidationError::ImpliedPriceDeviation { .. }));
    }

    #[test]
    fn test_ticker_zero_volume_skipped() {
        assert!(validate_ticker(&ticker(dec!(100), dec!(0), dec!(1100))).is_ok());
    }
}
