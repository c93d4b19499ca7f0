//! Record parsers: one raw exchange payload -> one canonical record
//!
//! Pure, stateless transforms given the registry entry for context. A
//! parser guarantees structural completeness only - every mandatory
//! canonical field populated, original payload preserved in `raw_data` -
//! and leaves semantic soundness to the validation layer.
//!
//! Raw shapes follow the exchange wire format: candles as string arrays
//! `[ts, open, high, low, close, baseVol, quoteVol]`, tickers and funding
//! rates as objects with string-encoded numbers.

use rust_decimal::Decimal;
use serde_json::Value;

use hermes_core::{FundingRate, Instrument, Kline, Ticker, TimestampMs};

use crate::error::ParseError;

/// Exchange-native symbol for an instrument, recovered from its retained
/// raw payload
///
/// This is the round-trip the registry guarantees: subsequent API calls
/// address the exchange by `instId`, never by the canonical id.
pub fn native_symbol(instrument: &Instrument) -> Result<&str, ParseError> {
    instrument
        .raw_data
        .get("instId")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField("instId"))
}

fn str_field<'a>(raw: &'a Value, field: &'static str) -> Result<&'a str, ParseError> {
    raw.get(field)
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField(field))
}

fn optional_str_field<'a>(raw: &'a Value, field: &'static str) -> Option<&'a str> {
    raw.get(field).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn decimal_from(field: &'static str, value: &str) -> Result<Decimal, ParseError> {
    value.parse::<Decimal>().map_err(|_| ParseError::Number {
        field,
        value: value.to_string(),
    })
}

fn ts_from(field: &'static str, value: &str) -> Result<TimestampMs, ParseError> {
    value
        .parse::<TimestampMs>()
        .map_err(|_| ParseError::Timestamp {
            field,
            value: value.to_string(),
        })
}

fn candle_item<'a>(
    items: &'a [Value],
    index: usize,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    items
        .get(index)
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField(field))
}

/// Parse one raw candle array into a canonical kline
pub fn parse_kline(raw: &Value, instrument: &Instrument) -> Result<Kline, ParseError> {
    let items = raw
        .as_array()
        .ok_or_else(|| ParseError::Shape("candle payload must be an array".to_string()))?;

    Ok(Kline {
        timestamp: ts_from("ts", candle_item(items, 0, "ts")?)?,
        instrument_id: instrument.instrument_id.clone(),
        market_type: instrument.market_type,
        open: decimal_from("open", candle_item(items, 1, "open")?)?,
        high: decimal_from("high", candle_item(items, 2, "high")?)?,
        low: decimal_from("low", candle_item(items, 3, "low")?)?,
        close: decimal_from("close", candle_item(items, 4, "close")?)?,
        base_volume: decimal_from("vol", candle_item(items, 5, "vol")?)?,
        quote_volume: decimal_from("volCcy", candle_item(items, 6, "volCcy")?)?,
        raw_data: raw.clone(),
    })
}

/// Parse one raw 24h ticker object into a canonical ticker
pub fn parse_ticker(raw: &Value, instrument: &Instrument) -> Result<Ticker, ParseError> {
    Ok(Ticker {
        timestamp: ts_from("ts", str_field(raw, "ts")?)?,
        instrument_id: instrument.instrument_id.clone(),
        market_type: instrument.market_type,
        last: decimal_from("last", str_field(raw, "last")?)?,
        bid: decimal_from("bidPx", str_field(raw, "bidPx")?)?,
        ask: decimal_from("askPx", str_field(raw, "askPx")?)?,
        base_volume: decimal_from("vol24h", str_field(raw, "vol24h")?)?,
        quote_volume: decimal_from("volCcy24h", str_field(raw, "volCcy24h")?)?,
        raw_data: raw.clone(),
    })
}

/// Parse one raw funding-rate history entry
pub fn parse_funding_rate(raw: &Value, instrument: &Instrument) -> Result<FundingRate, ParseError> {
    let realized_rate = match optional_str_field(raw, "realizedRate") {
        Some(value) => Some(decimal_from("realizedRate", value)?),
        None => None,
    };
    Ok(FundingRate {
        timestamp: ts_from("fundingTime", str_field(raw, "fundingTime")?)?,
        instrument_id: instrument.instrument_id.clone(),
        market_type: instrument.market_type,
        funding_rate: decimal_from("fundingRate", str_field(raw, "fundingRate")?)?,
        realized_rate,
        next_funding_time: None,
        raw_data: raw.clone(),
    })
}

/// Parse the raw current funding rate for a perp instrument
pub fn parse_current_funding_rate(
    raw: &Value,
    instrument: &Instrument,
) -> Result<FundingRate, ParseError> {
    let next_funding_time = match optional_str_field(raw, "nextFundingTime") {
        Some(value) => Some(ts_from("nextFundingTime", value)?),
        None => None,
    };
    Ok(FundingRate {
        timestamp: ts_from("fundingTime", str_field(raw, "fundingTime")?)?,
        instrument_id: instrument.instrument_id.clone(),
        market_type: instrument.market_type,
        funding_rate: decimal_from("fundingRate", str_field(raw, "fundingRate")?)?,
        realized_rate: None,
        next_funding_time,
        raw_data: raw.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{InstrumentId, MarketType};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn instrument(market_type: MarketType) -> Instrument {
        let (is_spot, is_margin, is_futures, is_perp) = Instrument::flags_for(market_type);
        Instrument {
            instrument_id: InstrumentId::new("BTC/USDT"),
            base: "BTC".to_string(),
            quote: "USDT".to_string(),
            settle: "USDT".to_string(),
            market_type,
            is_spot,
            is_margin,
            is_futures,
            is_perp,
            is_linear: true,
            is_inverse: false,
            contract_size: Decimal::ONE,
            multiplier: Decimal::ONE,
            tick_size: dec!(0.1),
            min_order_size: dec!(0.001),
            max_order_size: dec!(1000),
            leverage: Decimal::ONE,
            listing_time: 0,
            expiration_time: None,
            raw_data: json!({"instId": "BTC-USDT"}),
        }
    }

    #[test]
    fn test_native_symbol_round_trip() {
        assert_eq!(
            native_symbol(&instrument(MarketType::Spot)).unwrap(),
            "BTC-USDT"
        );
    }

    #[test]
    fn test_native_symbol_missing() {
        let mut broken = instrument(MarketType::Spot);
        broken.raw_data = Value::Null;
        assert!(matches!(
            native_symbol(&broken),
            Err(ParseError::MissingField("instId"))
        ));
    }

    #[test]
    fn test_parse_kline() {
        let raw = json!(["1700000000000", "100", "110", "95", "105", "12.5", "1300"]);
        let kline = parse_kline(&raw, &instrument(MarketType::Spot)).unwrap();

        assert_eq!(kline.timestamp, 1_700_000_000_000);
        assert_eq!(kline.open, dec!(100));
        assert_eq!(kline.high, dec!(110));
        assert_eq!(kline.low, dec!(95));
        assert_eq!(kline.close, dec!(105));
        assert_eq!(kline.base_volume, dec!(12.5));
        assert_eq!(kline.quote_volume, dec!(1300));
        assert_eq!(kline.raw_data, raw);
    }

    #[test]
    fn test_parse_kline_short_array() {
        let raw = json!(["1700000000000", "100", "110"]);
        let err = parse_kline(&raw, &instrument(MarketType::Spot)).unwrap_err();
        assert_eq!(err, ParseError::MissingField("low"));
    }

    #[test]
    fn test_parse_kline_bad_number() {
        let raw = json!(["1700000000000", "100", "nope", "95", "105", "12.5", "1300"]);
        let err = parse_kline(&raw, &instrument(MarketType::Spot)).unwrap_err();
        assert!(matches!(err, ParseError::Number { field: "high", .. }));
    }

    #[test]
    fn test_parse_ticker() {
        let raw = json!({
            "instId": "BTC-USDT",
            "last": "100",
            "bidPx": "99.9",
            "askPx": "100.1",
            "vol24h": "10",
            "volCcy24h": "1010",
            "ts": "1700000000000"
        });
        let ticker = parse_ticker(&raw, &instrument(MarketType::Spot)).unwrap();

        assert_eq!(ticker.last, dec!(100));
        assert_eq!(ticker.implied_price(), Some(dec!(101)));
    }

    #[test]
    fn test_parse_funding_rate_history_entry() {
        let raw = json!({
            "instId": "BTC-USDT-SWAP",
            "fundingRate": "0.0001",
            "realizedRate": "0.00009",
            "fundingTime": "1700000000000"
        });
        let rate = parse_funding_rate(&raw, &instrument(MarketType::Perp)).unwrap();

        assert_eq!(rate.timestamp, 1_700_000_000_000);
        assert_eq!(rate.funding_rate, dec!(0.0001));
        assert_eq!(rate.realized_rate, Some(dec!(0.00009)));
        assert_eq!(rate.next_funding_time, None);
    }

    #[test]
    fn test_parse_current_funding_rate() {
        let raw = json!({
            "instId": "BTC-USDT-SWAP",
            "fundingRate": "0.0001",
            "fundingTime": "1700000000000",
            "nextFundingTime": "1700028800000"
        });
        let rate = parse_current_funding_rate(&raw, &instrument(MarketType::Perp)).unwrap();

        assert_eq!(rate.next_funding_time, Some(1_700_028_800_000));
        assert_eq!(rate.realized_rate, None);
    }
}
