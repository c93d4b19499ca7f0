use serde::{Deserialize, Serialize};

/// Tunable limits for the client's retrieval behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Page size requested from the candles endpoint
    pub kline_page_limit: usize,
    /// Page size requested from the funding-rate history endpoint
    pub funding_page_limit: usize,
    /// Concurrent requests per batch when fetching many tickers
    pub ticker_batch_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            kline_page_limit: 300,
            funding_page_limit: 100,
            ticker_batch_size: 20,
        }
    }
}
