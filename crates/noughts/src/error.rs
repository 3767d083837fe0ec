//! Unified error type for the noughts crates.

use noughts_client::ClientError;
use noughts_protocol::ProtocolError;
use noughts_transport::{ConnectError, TransportError};

/// Top-level error that wraps every crate-specific error.
///
/// Applications built on the `noughts` facade can use this single type with
/// `?` instead of importing each sub-crate's error.
#[derive(Debug, thiserror::Error)]
pub enum NoughtsError {
    /// A message could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A connection could not be established.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// An established connection failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The client controller rejected or could not take a request.
    #[error(transparent)]
    Client(#[from] ClientError),
}
