//! Error types for the client crate

use thiserror::Error;

use hermes_core::{InstrumentId, ValidationError};
use hermes_paginator::PaginationError;
use hermes_ports::TransportError;

/// A raw payload could not populate a mandatory canonical field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("invalid number in {field}: {value:?}")]
    Number { field: &'static str, value: String },

    #[error("invalid timestamp in {field}: {value:?}")]
    Timestamp { field: &'static str, value: String },

    #[error("unexpected payload shape: {0}")]
    Shape(String),
}

/// Client-level errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Instrument id not present in the held registry
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(InstrumentId),

    /// Range/count query failed (invalid query, upstream failure,
    /// malformed record, stalled cursor)
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// Transport failure on a single-call endpoint
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A single-call payload could not be parsed
    #[error("Malformed record: {0}")]
    MalformedRecord(#[from] ParseError),

    /// A structurally valid record failed a business invariant
    #[error("Semantic violation: {0}")]
    SemanticViolation(#[from] ValidationError),

    /// A batch worker task panicked or was cancelled
    #[error("Batch task failed: {0}")]
    TaskFailed(String),
}
