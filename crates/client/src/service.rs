//! The exchange client: registry lifecycle plus normalized queries

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinSet;

use hermes_core::{
    FundingRate, Instrument, InstrumentId, InstrumentRegistry, Interval, Kline, MarketType, Ticker,
    TimestampMs, validate_kline, validate_ticker,
};
use hermes_normalizer::build_registry;
use hermes_paginator::{PageSource, PaginationError, RangeQuery, fetch_range};
use hermes_ports::Transport;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::parse::{
    native_symbol, parse_current_funding_rate, parse_funding_rate, parse_kline, parse_ticker,
};

/// Normalized client over one exchange
///
/// Holds the combined instrument registry as a swappable `Arc` snapshot:
/// reads clone the `Arc` and keep their view for the duration of a query,
/// rebuilds swap the reference. The registry starts empty; call
/// [`ExchangeClient::sync_exchange_info`] before issuing queries.
pub struct ExchangeClient<T: Transport> {
    transport: Arc<T>,
    registry: RwLock<Arc<InstrumentRegistry>>,
    config: ClientConfig,
}

impl<T: Transport + 'static> ExchangeClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            registry: RwLock::new(Arc::new(InstrumentRegistry::new())),
            config,
        }
    }

    /// Fetch every market type's raw instrument list, build a fresh
    /// combined registry, and swap the held snapshot
    ///
    /// Returns the new registry. In-flight queries holding the previous
    /// snapshot are unaffected.
    pub async fn sync_exchange_info(&self) -> Result<Arc<InstrumentRegistry>, ClientError> {
        let mut payloads: BTreeMap<MarketType, Vec<Value>> = BTreeMap::new();
        for market_type in MarketType::all() {
            let raw = self.transport.fetch_instruments(market_type).await?;
            payloads.insert(market_type, raw);
        }

        let registry = Arc::new(build_registry(&payloads));
        debug!("exchange info synced: {} instruments", registry.len());

        let mut held = self.registry.write().await;
        *held = Arc::clone(&registry);
        Ok(registry)
    }

    /// Current registry snapshot
    pub async fn registry(&self) -> Arc<InstrumentRegistry> {
        Arc::clone(&*self.registry.read().await)
    }

    /// Look up an instrument by canonical id
    pub async fn get_instrument(&self, id: &InstrumentId) -> Result<Instrument, ClientError> {
        let registry = self.registry().await;
        registry
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::UnknownInstrument(id.clone()))
    }

    /// Historical klines for `[start, end]` or the most recent `num` bars
    ///
    /// Exactly one of `(start, end)` or `num` must be supplied (`num` may
    /// carry an optional `end` upper bound). Returns a complete, sorted,
    /// deduplicated sequence or an error - never a truncated one.
    pub async fn history_klines(
        &self,
        id: &InstrumentId,
        interval: Interval,
        start: Option<TimestampMs>,
        end: Option<TimestampMs>,
        num: Option<usize>,
    ) -> Result<Vec<Kline>, ClientError> {
        let instrument = self.get_instrument(id).await?;
        let query = RangeQuery::from_parts(start, end, num)?;
        let source = KlinePageSource {
            transport: self.transport.as_ref(),
            instrument: &instrument,
            interval,
        };
        let klines = fetch_range(&source, query, self.config.kline_page_limit).await?;
        for kline in &klines {
            validate_kline(kline)?;
        }
        Ok(klines)
    }

    /// Historical funding rates for a perp instrument
    pub async fn history_funding_rates(
        &self,
        id: &InstrumentId,
        start: Option<TimestampMs>,
        end: Option<TimestampMs>,
        num: Option<usize>,
    ) -> Result<Vec<FundingRate>, ClientError> {
        let instrument = self.get_instrument(id).await?;
        let query = RangeQuery::from_parts(start, end, num)?;
        let source = FundingPageSource {
            transport: self.transport.as_ref(),
            instrument: &instrument,
        };
        let rates = fetch_range(&source, query, self.config.funding_page_limit).await?;
        Ok(rates)
    }

    /// Current funding rate for a perp instrument
    pub async fn current_funding_rate(
        &self,
        id: &InstrumentId,
    ) -> Result<FundingRate, ClientError> {
        let instrument = self.get_instrument(id).await?;
        let native = native_symbol(&instrument)?;
        let raw = self.transport.fetch_current_funding_rate(native).await?;
        Ok(parse_current_funding_rate(&raw, &instrument)?)
    }

    /// 24h ticker for one instrument
    pub async fn get_ticker(&self, id: &InstrumentId) -> Result<Ticker, ClientError> {
        let instrument = self.get_instrument(id).await?;
        let native = native_symbol(&instrument)?;
        let raw = self.transport.fetch_ticker(native).await?;
        let ticker = parse_ticker(&raw, &instrument)?;
        validate_ticker(&ticker)?;
        Ok(ticker)
    }

    /// 24h tickers for every instrument of a market type
    ///
    /// Independent single-symbol requests issued in bounded batches
    /// (`ticker_batch_size` in flight at a time) to respect exchange rate
    /// limits. All-or-nothing: the first failed request fails the call.
    pub async fn get_tickers(&self, market_type: MarketType) -> Result<Vec<Ticker>, ClientError> {
        let registry = self.registry().await;
        let targets: Vec<Instrument> = registry
            .instruments_of(market_type)
            .cloned()
            .collect();
        debug!(
            "fetching {} {} tickers in batches of {}",
            targets.len(),
            market_type,
            self.config.ticker_batch_size
        );

        let results: Arc<DashMap<InstrumentId, Ticker>> = Arc::new(DashMap::new());
        for chunk in targets.chunks(self.config.ticker_batch_size.max(1)) {
            let mut tasks: JoinSet<Result<(), ClientError>> = JoinSet::new();
            for instrument in chunk {
                let transport = Arc::clone(&self.transport);
                let results = Arc::clone(&results);
                let instrument = instrument.clone();
                tasks.spawn(async move {
                    let native = native_symbol(&instrument)?.to_string();
                    let raw = transport.fetch_ticker(&native).await?;
                    let ticker = parse_ticker(&raw, &instrument)?;
                    validate_ticker(&ticker)?;
                    results.insert(ticker.instrument_id.clone(), ticker);
                    Ok(())
                });
            }
            while let Some(joined) = tasks.join_next().await {
                joined.map_err(|e| ClientError::TaskFailed(e.to_string()))??;
            }
        }

        let mut tickers: Vec<Ticker> = results.iter().map(|entry| entry.value().clone()).collect();
        tickers.sort_by(|a, b| a.instrument_id.cmp(&b.instrument_id));
        Ok(tickers)
    }
}

/// Candles endpoint composed with the kline parser
struct KlinePageSource<'a, T: Transport> {
    transport: &'a T,
    instrument: &'a Instrument,
    interval: Interval,
}

#[async_trait]
impl<'a, T: Transport> PageSource for KlinePageSource<'a, T> {
    type Record = Kline;

    async fn fetch_page(
        &self,
        before: Option<TimestampMs>,
        limit: usize,
    ) -> Result<Vec<Kline>, PaginationError> {
        let native = native_symbol(self.instrument)
            .map_err(|e| PaginationError::MalformedRecord(e.to_string()))?;
        let raw_page = self
            .transport
            .fetch_kline_page(native, self.interval, before, limit)
            .await?;
        raw_page
            .iter()
            .map(|raw| {
                parse_kline(raw, self.instrument)
                    .map_err(|e| PaginationError::MalformedRecord(e.to_string()))
            })
            .collect()
    }
}

/// Funding-rate history endpoint composed with the funding parser
struct FundingPageSource<'a, T: Transport> {
    transport: &'a T,
    instrument: &'a Instrument,
}

#[async_trait]
impl<'a, T: Transport> PageSource for FundingPageSource<'a, T> {
    type Record = FundingRate;

    async fn fetch_page(
        &self,
        before: Option<TimestampMs>,
        limit: usize,
    ) -> Result<Vec<FundingRate>, PaginationError> {
        let native = native_symbol(self.instrument)
            .map_err(|e| PaginationError::MalformedRecord(e.to_string()))?;
        let raw_page = self
            .transport
            .fetch_funding_page(native, before, limit)
            .await?;
        raw_page
            .iter()
            .map(|raw| {
                parse_funding_rate(raw, self.instrument)
                    .map_err(|e| PaginationError::MalformedRecord(e.to_string()))
            })
            .collect()
    }
}
