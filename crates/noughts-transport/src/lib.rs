//! Session transport for the noughts client.
//!
//! Owns the network side of a session: dialling the server through a
//! [`Connector`], framing text messages with [`LineCodec`], and running one
//! I/O worker per live connection that reports [`TransportEvent`]s to a
//! single listener.
//!
//! # Feature Flags
//!
//! - `tcp` (default): [`TcpConnector`] over `tokio::net::TcpStream`

mod connection;
mod error;
mod framing;
#[cfg(feature = "tcp")]
mod tcp;

pub use connection::{connect, open, EventSender, TransportEvent, TransportHandle};
pub use error::{ConnectError, TransportError};
pub use framing::{frame, LineCodec};
#[cfg(feature = "tcp")]
pub use tcp::TcpConnector;

use std::fmt;
use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};

/// Lowest port a connection target may use.
pub const MIN_PORT: u16 = 1024;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Where to connect: a host name or IP literal and a TCP port in
/// `1024..=65535`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionTarget {
    host: String,
    port: u16,
}

impl ConnectionTarget {
    /// Validates and builds a target.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ConnectError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(ConnectError::InvalidTarget("host is empty".into()));
        }
        if port < MIN_PORT {
            return Err(ConnectError::InvalidTarget(format!(
                "port {port} is below {MIN_PORT}"
            )));
        }
        Ok(Self { host, port })
    }

    /// The host name or IP literal.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Dials the server and yields a raw byte stream.
///
/// The transport wraps whatever stream this returns with line framing and an
/// I/O worker, so implementations only deal with establishing the link.
/// Timeouts are applied by [`connect`], not here.
pub trait Connector: Send + Sync + 'static {
    /// The stream type produced by this connector.
    type Stream: AsyncRead + AsyncWrite + Send + Unpin + 'static;

    /// Opens a stream to `target`.
    fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> impl Future<Output = std::io::Result<Self::Stream>> + Send;
}
