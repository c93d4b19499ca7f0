//! Market-type-specific raw-to-canonical field extraction
//!
//! Raw shapes follow the exchange's instruments endpoint: numeric fields
//! arrive as strings, timestamps as epoch-millisecond strings, and an
//! empty string stands for "absent". Each extractor is a pure function
//! selected through [`extractor_for`].

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use hermes_core::{Instrument, InstrumentId, MarketType, TimestampMs};

use crate::error::ExtractError;

/// Pure raw-payload-to-instrument mapping for one market type
pub type Extractor = fn(&Value, MarketType) -> Result<Instrument, ExtractError>;

/// Tagged dispatch: select the extractor for a market type
///
/// Spot and margin share a shape (plain currency pair); futures and perp
/// share the contract shape (underlying, settle currency, contract value).
pub fn extractor_for(market_type: MarketType) -> Extractor {
    match market_type {
        MarketType::Spot | MarketType::Margin => extract_spot_margin,
        MarketType::Futures | MarketType::Perp => extract_contract,
    }
}

/// Raw spot/margin instrument entry
#[derive(Debug, Deserialize)]
struct RawPairInstrument {
    #[serde(rename = "instId")]
    inst_id: String,
    #[serde(rename = "baseCcy")]
    base_ccy: String,
    #[serde(rename = "quoteCcy")]
    quote_ccy: String,
    #[serde(rename = "tickSz")]
    tick_sz: Decimal,
    #[serde(rename = "minSz")]
    min_sz: Decimal,
    #[serde(rename = "maxMktSz")]
    max_mkt_sz: Decimal,
    #[serde(rename = "lever", default)]
    lever: Option<Decimal>,
    #[serde(rename = "listTime")]
    list_time: String,
}

/// Raw futures/perp instrument entry
#[derive(Debug, Deserialize)]
struct RawContractInstrument {
    #[serde(rename = "instId")]
    inst_id: String,
    #[serde(rename = "uly")]
    underlying: String,
    #[serde(rename = "settleCcy")]
    settle_ccy: String,
    #[serde(rename = "ctVal")]
    ct_val: Decimal,
    #[serde(rename = "ctMult")]
    ct_mult: Decimal,
    #[serde(rename = "ctType")]
    ct_type: String,
    #[serde(rename = "tickSz")]
    tick_sz: Decimal,
    #[serde(rename = "minSz")]
    min_sz: Decimal,
    #[serde(rename = "maxMktSz")]
    max_mkt_sz: Decimal,
    #[serde(rename = "lever")]
    lever: Decimal,
    #[serde(rename = "listTime")]
    list_time: String,
    #[serde(rename = "expTime", default)]
    exp_time: Option<String>,
}

fn parse_ts(raw: &str) -> Result<TimestampMs, ExtractError> {
    raw.parse::<TimestampMs>()
        .map_err(|_| ExtractError::Timestamp(raw.to_string()))
}

fn parse_optional_ts(raw: Option<&str>) -> Result<Option<TimestampMs>, ExtractError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => parse_ts(value).map(Some),
    }
}

fn extract_spot_margin(raw: &Value, market_type: MarketType) -> Result<Instrument, ExtractError> {
    let entry: RawPairInstrument =
        serde_json::from_value(raw.clone()).map_err(|e| ExtractError::Field(e.to_string()))?;
    if entry.inst_id.is_empty() {
        return Err(ExtractError::Field("instId is empty".to_string()));
    }

    let (is_spot, is_margin, is_futures, is_perp) = Instrument::flags_for(market_type);
    Ok(Instrument {
        instrument_id: InstrumentId::derive(
            &entry.base_ccy,
            &entry.quote_ccy,
            &entry.quote_ccy,
            market_type,
            None,
        ),
        base: entry.base_ccy,
        quote: entry.quote_ccy.clone(),
        settle: entry.quote_ccy,
        market_type,
        is_spot,
        is_margin,
        is_futures,
        is_perp,
        is_linear: true,
        is_inverse: false,
        contract_size: Decimal::ONE,
        multiplier: Decimal::ONE,
        tick_size: entry.tick_sz,
        min_order_size: entry.min_sz,
        max_order_size: entry.max_mkt_sz,
        leverage: entry.lever.unwrap_or(Decimal::ONE),
        listing_time: parse_ts(&entry.list_time)?,
        expiration_time: None,
        raw_data: raw.clone(),
    })
}

fn extract_contract(raw: &Value, market_type: MarketType) -> Result<Instrument, ExtractError> {
    let entry: RawContractInstrument =
        serde_json::from_value(raw.clone()).map_err(|e| ExtractError::Field(e.to_string()))?;
    if entry.inst_id.is_empty() {
        return Err(ExtractError::Field("instId is empty".to_string()));
    }

    let (base, quote) = entry
        .underlying
        .split_once('-')
        .ok_or_else(|| ExtractError::Underlying(entry.underlying.clone()))?;

    let expiration_time = parse_optional_ts(entry.exp_time.as_deref())?;
    if market_type == MarketType::Futures && expiration_time.is_none() {
        return Err(ExtractError::Field("expTime is required for futures".to_string()));
    }

    let is_linear = entry.ct_type == "linear";
    let (is_spot, is_margin, is_futures, is_perp) = Instrument::flags_for(market_type);
    Ok(Instrument {
        instrument_id: InstrumentId::derive(
            base,
            quote,
            &entry.settle_ccy,
            market_type,
            expiration_time,
        ),
        base: base.to_string(),
        quote: quote.to_string(),
        settle: entry.settle_ccy,
        market_type,
        is_spot,
        is_margin,
        is_futures,
        is_perp,
        is_linear,
        is_inverse: !is_linear,
        contract_size: entry.ct_val,
        multiplier: entry.ct_mult,
        tick_size: entry.tick_sz,
        min_order_size: entry.min_sz,
        max_order_size: entry.max_mkt_sz,
        leverage: entry.lever,
        listing_time: parse_ts(&entry.list_time)?,
        expiration_time,
        raw_data: raw.clone(),
    })
}
