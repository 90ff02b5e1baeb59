//! Error types for the protocol layer.
//!
//! Each crate in Mapcast defines its own error enum. A `ProtocolError`
//! always means the caller handed us malformed input, never that some
//! shared state was in the wrong shape.

/// Errors that can occur while validating caller input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The player name was empty or contained only whitespace.
    #[error("player name must not be blank")]
    EmptyName,

    /// Map ids are positive integers. Zero and negatives are rejected.
    #[error("map id must be greater than 0, got {0}")]
    InvalidMapId(i64),
}
