//! Codec trait and implementations for turning values into message text.
//!
//! The wire carries one UTF-8 text message per line, so a codec here maps
//! values to and from `String` rather than raw bytes. The rest of the
//! client only needs something that implements [`Codec`]; swapping the
//! grammar means adding another implementation, nothing else.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode values to text and decode text back.
///
/// `Send + Sync + 'static` because the controller owns its codec inside a
/// long-lived Tokio task that may run on any worker thread.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a single-line message.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes one message back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the text is malformed, incomplete,
    /// or doesn't match the expected type.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses compact JSON (via `serde_json`).
///
/// `serde_json::to_string` never emits a raw newline for compact output
/// (newlines inside strings are escaped), so every encoded value is safe to
/// frame as one line.
///
/// ## Example
///
/// ```rust
/// use noughts_protocol::{Codec, JsonCodec, Status};
///
/// let codec = JsonCodec;
/// let text = codec.encode(&Status::YourTurn).unwrap();
/// assert_eq!(text, "\"YOUR_TURN\"");
///
/// let decoded: Status = codec.decode(&text).unwrap();
/// assert_eq!(decoded, Status::YourTurn);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}
