//! Hermes Client
//!
//! The registry consumer surface over one exchange. An [`ExchangeClient`]
//! wraps a [`hermes_ports::Transport`], holds the combined instrument
//! registry as an atomically-swappable snapshot, and exposes normalized
//! queries: instrument lookup, historical klines and funding rates driven
//! by the pagination engine, and single/batched ticker fetches.
//!
//! ## Registry lifecycle
//!
//! `sync_exchange_info` fetches every market type's raw instrument list,
//! builds a fresh registry through the normalizer, and swaps the held
//! `Arc` reference. In-flight queries keep reading their own snapshot and
//! never observe a partially-rebuilt registry.

mod config;
mod error;
mod parse;
mod service;

pub use config::ClientConfig;
pub use error::{ClientError, ParseError};
pub use parse::{
    native_symbol, parse_current_funding_rate, parse_funding_rate, parse_kline, parse_ticker,
};
pub use service::ExchangeClient;
