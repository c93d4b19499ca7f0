//! Hermes Paginator
//!
//! Generic backward-pagination engine for cursor-only historical endpoints.
//! Target endpoints expose a "records at or before this timestamp" cursor
//! and a page-size limit; there is no forward cursor, no total count and no
//! offset addressing. The engine reconstructs either a caller-requested
//! time window or the most recent N records by walking the cursor backward,
//! deduplicating overlapping pages into an ordered accumulator, and
//! stopping on end-of-history, the window floor, or the record count.
//!
//! Page fetches are strictly sequential: the next cursor derives from the
//! contents of the previous page, so a single query cannot be parallelized.

mod engine;
mod error;
mod query;
mod source;

pub use engine::fetch_range;
pub use error::PaginationError;
pub use query::RangeQuery;
pub use source::PageSource;
