use hermes_core::TimestampMs;

use crate::error::PaginationError;

/// A validated historical-range query
///
/// Exactly one mode applies per query; construction through [`RangeQuery::from_parts`]
/// enforces the input contract so the engine never sees an ambiguous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeQuery {
    /// All records with `start <= timestamp <= end`
    Window {
        start: TimestampMs,
        end: TimestampMs,
    },
    /// The most recent `count` records, optionally bounded above by `end`
    Latest {
        count: usize,
        end: Option<TimestampMs>,
    },
}

impl RangeQuery {
    /// Time-window query over `[start, end]`, both bounds inclusive
    pub fn window(start: TimestampMs, end: TimestampMs) -> Result<Self, PaginationError> {
        if start > end {
            return Err(PaginationError::InvalidQuery(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self::Window { start, end })
    }

    /// Most-recent-`count` query
    pub fn latest(count: usize) -> Result<Self, PaginationError> {
        Self::latest_parts(count, None)
    }

    /// Most-recent-`count` query with an upper timestamp bound
    pub fn latest_before(count: usize, end: TimestampMs) -> Result<Self, PaginationError> {
        Self::latest_parts(count, Some(end))
    }

    fn latest_parts(count: usize, end: Option<TimestampMs>) -> Result<Self, PaginationError> {
        if count == 0 {
            return Err(PaginationError::InvalidQuery(
                "num must be positive".to_string(),
            ));
        }
        Ok(Self::Latest { count, end })
    }

    /// Build a query from the optional parameters of the public surface
    ///
    /// Accepted combinations: `start` and `end` together, or `num` with an
    /// optional `end` upper bound. Anything else (neither form, `start`
    /// without `end`, both forms at once) is an input-contract violation.
    pub fn from_parts(
        start: Option<TimestampMs>,
        end: Option<TimestampMs>,
        num: Option<usize>,
    ) -> Result<Self, PaginationError> {
        match (start, end, num) {
            (Some(start), Some(end), None) => Self::window(start, end),
            (None, end, Some(num)) => Self::latest_parts(num, end),
            (Some(_), Some(_), Some(_)) => Err(PaginationError::InvalidQuery(
                "supply either (start, end) or num, not both".to_string(),
            )),
            (Some(_), None, _) => Err(PaginationError::InvalidQuery(
                "start requires end".to_string(),
            )),
            (None, _, None) => Err(PaginationError::InvalidQuery(
                "either (start, end) or num must be provided".to_string(),
            )),
        }
    }
}
