use async_trait::async_trait;
use serde_json::Value;

use hermes_core::{Interval, MarketType, TimestampMs};

use crate::error::TransportError;

/// Transport client port
///
/// Issues authenticated HTTP calls against one exchange and hands back the
/// raw JSON payloads. Request signing, retry/backoff and rate limiting all
/// live behind this trait; the retrieval core never sees them.
///
/// ## Paged endpoints
///
/// `fetch_kline_page` / `fetch_funding_page` expose the exchange's
/// backward-only cursor: when `before` is `Some(ts)`, the page contains
/// only records with `timestamp <= ts` (inclusive bound). There is no
/// forward cursor, total count or offset addressing. Page order is
/// exchange-native; callers extract min/max timestamps themselves.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Raw instrument list for one market type (exchange-info endpoint)
    async fn fetch_instruments(
        &self,
        market_type: MarketType,
    ) -> Result<Vec<Value>, TransportError>;

    /// One page of raw candlestick records for a native symbol
    async fn fetch_kline_page(
        &self,
        native_symbol: &str,
        interval: Interval,
        before: Option<TimestampMs>,
        limit: usize,
    ) -> Result<Vec<Value>, TransportError>;

    /// One page of raw funding-rate history for a native symbol
    async fn fetch_funding_page(
        &self,
        native_symbol: &str,
        before: Option<TimestampMs>,
        limit: usize,
    ) -> Result<Vec<Value>, TransportError>;

    /// Raw 24h ticker for a native symbol
    async fn fetch_ticker(&self, native_symbol: &str) -> Result<Value, TransportError>;

    /// Raw current funding rate for a native perp symbol
    async fn fetch_current_funding_rate(
        &self,
        native_symbol: &str,
    ) -> Result<Value, TransportError>;
}
