//! Hermes Core Domain
//!
//! Canonical schema for the Hermes exchange-normalization layer.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod instruments;
pub mod records;
pub mod validation;
pub mod values;

// Re-export commonly used types at crate root
pub use instruments::{Instrument, InstrumentId, InstrumentRegistry, MarketType};
pub use records::{FundingRate, Kline, Ticker, Timestamped};
pub use validation::{ValidationError, validate_kline, validate_ticker};
pub use values::{Interval, Price, Quantity, Rate, TimestampMs};
