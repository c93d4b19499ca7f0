//! Canonical time-series record shapes
//!
//! Produced on demand per request by the record parsers; `timestamp` is the
//! monotonic key and must be unique within one result sequence.

mod funding_rate;
mod kline;
mod ticker;

pub use funding_rate::FundingRate;
pub use kline::Kline;
pub use ticker::Ticker;

use crate::values::TimestampMs;

/// Access to the monotonic timestamp key of a time-series record
///
/// The pagination engine is generic over this: it needs nothing from a
/// record beyond its position on the time axis.
pub trait Timestamped {
    fn timestamp(&self) -> TimestampMs;
}

impl Timestamped for Kline {
    fn timestamp(&self) -> TimestampMs {
        self.timestamp
    }
}

impl Timestamped for Ticker {
    fn timestamp(&self) -> TimestampMs {
        self.timestamp
    }
}

impl Timestamped for FundingRate {
    fn timestamp(&self) -> TimestampMs {
        self.timestamp
    }
}
