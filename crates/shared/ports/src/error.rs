//! Error type for the transport port

use thiserror::Error;

/// Transport-level errors
///
/// A failed request must surface as one of these variants, never as an
/// empty-success page: the pagination engine treats an empty page as
/// end-of-history.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request failed: HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Response deserialization failed: {0}")]
    Deserialization(String),

    #[error("Timeout waiting for response")]
    Timeout,
}
