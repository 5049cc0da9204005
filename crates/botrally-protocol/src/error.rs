//! Error types for the protocol layer.
//!
//! Each crate in Botrally defines its own error enum. This keeps errors
//! specific and meaningful — a `ProtocolError` always means a
//! client-supplied value failed to parse, not that storage or
//! coordination went wrong.

/// Errors that can occur while interpreting client-supplied values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The status string is not one of `WAITING`, `IN_PROGRESS`,
    /// `FINISHED`.
    ///
    /// Room status transitions are externally driven — clients send the
    /// target status as text, so a typo or an unknown value ends up here.
    #[error("unknown room status: {0:?}")]
    UnknownStatus(String),
}
