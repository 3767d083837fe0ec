//! Newline framing for the text protocol.
//!
//! Each message is UTF-8 text followed by a single `\n`. Reading is lazy:
//! [`LineCodec`] plugs into `tokio_util::codec::FramedRead`, which yields
//! one message per complete line and keeps partial input buffered across
//! socket reads. No length limit is applied here; the read buffer size is
//! chosen by the caller.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

const TERMINATOR: u8 = b'\n';

/// Appends the terminator to a message payload.
///
/// The payload must not contain `\n` itself; that is a caller contract and
/// is only checked in debug builds.
pub fn frame(message: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(message.len() + 1);
    put_frame(message, &mut out);
    out
}

/// Writes one framed message into `dst`. Shared by [`frame`] and the
/// encoder so both produce identical bytes.
fn put_frame<B: BufMut>(message: &str, dst: &mut B) {
    debug_assert!(
        !message.as_bytes().contains(&TERMINATOR),
        "message payload contains a line terminator"
    );
    dst.put_slice(message.as_bytes());
    dst.put_u8(TERMINATOR);
}

/// Splits a byte stream into lines and frames outbound messages.
///
/// Decoding strips the `\n` and an optional preceding `\r`. Bytes that are
/// not valid UTF-8 are replaced with U+FFFD; the resulting message then
/// fails to decode one layer up instead of tearing the connection down.
#[derive(Debug, Clone, Default)]
pub struct LineCodec {
    /// Where to resume the terminator search, so a long partial line is
    /// not rescanned on every read.
    next_index: usize,
}

impl LineCodec {
    /// Creates a codec with an empty scan position.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        let start = self.next_index.min(src.len());
        let Some(offset) = src[start..]
            .iter()
            .position(|b| *b == TERMINATOR)
        else {
            self.next_index = src.len();
            return Ok(None);
        };

        let end = start + offset;
        self.next_index = 0;

        let line = src.split_to(end + 1);
        let mut payload = &line[..end];
        if let [rest @ .., b'\r'] = payload {
            payload = rest;
        }
        Ok(Some(String::from_utf8_lossy(payload).into_owned()))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if !src.is_empty() {
            tracing::trace!(bytes = src.len(), "discarding unterminated tail");
            src.clear();
            self.next_index = 0;
        }
        Ok(None)
    }
}

impl Encoder<String> for LineCodec {
    type Error = std::io::Error;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&str>>::encode(self, item.as_str(), dst)
    }
}

impl Encoder<&str> for LineCodec {
    type Error = std::io::Error;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len() + 1);
        put_frame(item, dst);
        Ok(())
    }
}
