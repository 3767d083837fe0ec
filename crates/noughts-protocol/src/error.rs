//! Error types for the protocol layer.
//!
//! When you see a `ProtocolError`, the problem is in turning text into a
//! [`GameSnapshot`](crate::GameSnapshot) or back, never in networking.

/// Errors that can occur while transcoding snapshots.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a snapshot into text).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning text into a snapshot).
    ///
    /// Common causes: malformed JSON, a missing required field, a board
    /// with the wrong number of cells, or an unknown status token.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message parsed but breaks a data-model rule, e.g. a move
    /// index outside the board.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// A malformed inbound message. Same type as [`ProtocolError`]; the alias
/// names the role it plays on the receive path.
pub type DecodeError = ProtocolError;
