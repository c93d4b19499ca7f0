use async_trait::async_trait;

use hermes_core::{TimestampMs, Timestamped};

use crate::error::PaginationError;

/// One paged endpoint, already composed with its record parser
///
/// Implementations wrap a transport call plus the raw-to-canonical parse:
/// transport failures surface as [`PaginationError::Upstream`], parse
/// failures as [`PaginationError::MalformedRecord`]. The engine treats an
/// empty page as end-of-history, so errors must never be coerced into
/// empty success.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Record: Timestamped + Send;

    /// Fetch one page of records
    ///
    /// When `before` is `Some(ts)`, only records with `timestamp <= ts`
    /// (inclusive bound) may be returned; `None` means the most recent
    /// page. Order within the page is exchange-native and carries no
    /// meaning; the engine extracts min timestamps itself.
    async fn fetch_page(
        &self,
        before: Option<TimestampMs>,
        limit: usize,
    ) -> Result<Vec<Self::Record>, PaginationError>;
}
