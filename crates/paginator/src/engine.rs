//! The backward-pagination loop
//!
//! Both modes share the same skeleton: fetch a page at the cursor, fold it
//! into an ordered accumulator keyed by timestamp (last write wins on
//! boundary overlap), then either stop or derive the next cursor from the
//! minimum timestamp of the page just fetched. Keeping the accumulator as
//! a `BTreeMap` makes at-most-one-record-per-timestamp and ascending output
//! order structural properties rather than post-processing steps.

use std::collections::BTreeMap;

use log::debug;

use hermes_core::{TimestampMs, Timestamped};

use crate::error::PaginationError;
use crate::query::RangeQuery;
use crate::source::PageSource;

/// Materialize a historical query against a cursor-only paged endpoint
///
/// Returns the complete, deduplicated, ascending-by-timestamp sequence the
/// query describes, or an error, never a silently truncated sequence.
/// `limit` is the page size requested from the source on every fetch; a
/// page shorter than `limit` signals end-of-history and ends the loop.
pub async fn fetch_range<S>(
    source: &S,
    query: RangeQuery,
    limit: usize,
) -> Result<Vec<S::Record>, PaginationError>
where
    S: PageSource + ?Sized,
{
    if limit == 0 {
        return Err(PaginationError::InvalidQuery(
            "page limit must be positive".to_string(),
        ));
    }
    match query {
        RangeQuery::Window { start, end } => fetch_window(source, start, end, limit).await,
        RangeQuery::Latest { count, end } => fetch_latest(source, count, end, limit).await,
    }
}

/// Range mode: all records with `start <= timestamp <= end`
async fn fetch_window<S>(
    source: &S,
    start: TimestampMs,
    end: TimestampMs,
    limit: usize,
) -> Result<Vec<S::Record>, PaginationError>
where
    S: PageSource + ?Sized,
{
    let mut accumulator: BTreeMap<TimestampMs, S::Record> = BTreeMap::new();
    // One past `end`: the inclusive cursor bound then admits the boundary
    // record at `end` itself on the first page.
    let mut cursor = end.saturating_add(1);
    let mut previous: Option<TimestampMs> = None;

    loop {
        if let Some(prev) = previous {
            if cursor >= prev {
                return Err(PaginationError::CursorStalled {
                    previous: prev,
                    next: cursor,
                });
            }
        }

        let page = source.fetch_page(Some(cursor), limit).await?;
        debug!(
            "window page: cursor={} len={} accumulated={}",
            cursor,
            page.len(),
            accumulator.len()
        );

        if page.is_empty() {
            break;
        }
        let short_page = page.len() < limit;

        let mut page_min = TimestampMs::MAX;
        for record in page {
            let ts = record.timestamp();
            page_min = page_min.min(ts);
            accumulator.insert(ts, record);
        }

        if short_page {
            break;
        }

        // Strictly older than anything already retrieved.
        let next = page_min.saturating_sub(1);
        if next < start {
            break;
        }
        previous = Some(cursor);
        cursor = next;
    }

    Ok(accumulator
        .into_iter()
        .filter(|(ts, _)| start <= *ts && *ts <= end)
        .map(|(_, record)| record)
        .collect())
}

/// Count mode: the most recent `count` records at or before `end`
async fn fetch_latest<S>(
    source: &S,
    count: usize,
    end: Option<TimestampMs>,
    limit: usize,
) -> Result<Vec<S::Record>, PaginationError>
where
    S: PageSource + ?Sized,
{
    let mut accumulator: BTreeMap<TimestampMs, S::Record> = BTreeMap::new();
    let mut cursor: Option<TimestampMs> = end;
    let mut previous: Option<TimestampMs> = None;

    loop {
        if let (Some(prev), Some(curr)) = (previous, cursor) {
            if curr >= prev {
                return Err(PaginationError::CursorStalled {
                    previous: prev,
                    next: curr,
                });
            }
        }

        let page = source.fetch_page(cursor, limit).await?;
        debug!(
            "latest page: cursor={:?} len={} accumulated={}",
            cursor,
            page.len(),
            accumulator.len()
        );

        if page.is_empty() {
            break;
        }
        let short_page = page.len() < limit;

        let mut page_min = TimestampMs::MAX;
        for record in page {
            let ts = record.timestamp();
            page_min = page_min.min(ts);
            accumulator.insert(ts, record);
        }

        if short_page || accumulator.len() >= count {
            break;
        }

        // The inclusive bound refetches the boundary record; the
        // accumulator absorbs the duplicate.
        previous = cursor;
        cursor = Some(page_min);
    }

    let mut records: Vec<S::Record> = accumulator.into_values().collect();
    if records.len() > count {
        records.drain(..records.len() - count);
    }
    Ok(records)
}
