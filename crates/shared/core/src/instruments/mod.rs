//! Canonical instrument descriptors and the combined registry

mod instrument;
mod market_type;
mod registry;

pub use instrument::{Instrument, InstrumentId};
pub use market_type::MarketType;
pub use registry::InstrumentRegistry;
