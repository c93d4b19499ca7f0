use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;

/// Rate value (funding rates, leverage ratios) - uses Decimal for precision
pub type Rate = Decimal;

/// Timestamp in exchange-native epoch milliseconds
///
/// Historical endpoints key records by this value; it is the monotonic
/// key for pagination and deduplication.
pub type TimestampMs = i64;

/// Convert an epoch-milliseconds timestamp to a UTC datetime
///
/// Returns `None` for values outside chrono's representable range.
pub fn datetime_from_ms(ts: TimestampMs) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ts)
}

/// Candlestick bar interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "5m")]
    Min5,
    #[serde(rename = "15m")]
    Min15,
    #[serde(rename = "30m")]
    Min30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
}

impl Interval {
    /// Canonical string form (e.g. "1m", "4h")
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Min1 => "1m",
            Interval::Min5 => "5m",
            Interval::Min15 => "15m",
            Interval::Min30 => "30m",
            Interval::Hour1 => "1h",
            Interval::Hour4 => "4h",
            Interval::Day1 => "1d",
        }
    }

    /// Bar duration in milliseconds
    pub fn duration_ms(&self) -> i64 {
        match self {
            Interval::Min1 => 60_000,
            Interval::Min5 => 300_000,
            Interval::Min15 => 900_000,
            Interval::Min30 => 1_800_000,
            Interval::Hour1 => 3_600_000,
            Interval::Hour4 => 14_400_000,
            Interval::Day1 => 86_400_000,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
