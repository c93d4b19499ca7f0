//! Error types for the pagination engine

use thiserror::Error;

use hermes_core::TimestampMs;
use hermes_ports::TransportError;

/// Pagination-level errors
///
/// The engine never retries, backs off, or returns partial data: any error
/// fails the whole range/count query, so callers receive either a complete
/// sorted sequence or an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaginationError {
    /// Input-contract violation (bad start/end/num combination, zero limit)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Transport/auth failure, propagated verbatim from the page source
    #[error("Upstream failure: {0}")]
    Upstream(#[from] TransportError),

    /// A parser could not populate a mandatory canonical field
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The cursor failed to strictly decrease between pages
    ///
    /// Guards against an exchange returning a stale or duplicate page,
    /// which would otherwise spin the loop forever.
    #[error("Cursor stalled: previous cursor {previous}, next cursor {next}")]
    CursorStalled {
        previous: TimestampMs,
        next: TimestampMs,
    },
}
