use serde::{Deserialize, Serialize};

use crate::instruments::{InstrumentId, MarketType};
use crate::values::{Rate, TimestampMs};

/// Canonical funding-rate record for perpetual contracts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRate {
    /// Funding time in exchange-native epoch milliseconds
    pub timestamp: TimestampMs,
    pub instrument_id: InstrumentId,
    pub market_type: MarketType,
    pub funding_rate: Rate,
    /// Rate actually settled at `timestamp` (history endpoints only)
    pub realized_rate: Option<Rate>,
    /// Next settlement time (current-rate endpoint only)
    pub next_funding_time: Option<TimestampMs>,
    /// Opaque exchange-native payload
    pub raw_data: serde_json::Value,
}
