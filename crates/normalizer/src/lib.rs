//! Hermes Normalizer
//!
//! Converts one exchange's raw instrument lists into the canonical
//! instrument registry. Each market type runs through its own field
//! extractor (a tagged dispatch table of pure functions); the per-market
//! registries are then folded into one combined registry in which a pair
//! listed under the same raw symbol on both spot and margin becomes a
//! single entry with both flags set.
//!
//! Malformed raw entries are dropped with a warning rather than failing
//! the whole build - markets list continuously and a partial registry is
//! still useful.

mod builder;
mod error;
mod extractor;

pub use builder::{build_market_registry, build_registry, combine_spot_margin};
pub use error::ExtractError;
pub use extractor::{Extractor, extractor_for};
