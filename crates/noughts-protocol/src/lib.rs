//! Wire protocol for the noughts client.
//!
//! This crate defines what the client and the game server exchange:
//!
//! - **Types** ([`GameSnapshot`], [`Board`], [`Status`], [`Mark`], [`Cell`]):
//!   the game state that travels on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how values become text.
//! - **Transcoder** ([`decode`], [`encode`]): snapshot-level parse and
//!   serialize with well-formedness checks.
//! - **Errors** ([`ProtocolError`]): what can go wrong while transcoding.
//!
//! # Architecture
//!
//! The protocol layer sits between the transport (text lines) and the
//! controller (game state). It knows nothing about sockets.
//!
//! ```text
//! Transport (lines) → Protocol (GameSnapshot) → Controller (session state)
//! ```

mod codec;
mod error;
mod snapshot;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::{DecodeError, ProtocolError};
pub use snapshot::{decode, encode, GameSnapshot};
pub use types::{Board, Cell, Mark, Status, BOARD_CELLS};
