//! Error type for raw-instrument extraction

use thiserror::Error;

/// A raw instrument entry could not populate a mandatory canonical field
///
/// Recovered locally at registry-build time: the entry is dropped and the
/// rest of the payload still builds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("missing or malformed field: {0}")]
    Field(String),

    #[error("invalid timestamp: {0:?}")]
    Timestamp(String),

    #[error("invalid underlying pair: {0:?}")]
    Underlying(String),
}
