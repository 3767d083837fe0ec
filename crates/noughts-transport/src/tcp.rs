//! TCP connector using `tokio::net::TcpStream`.

use tokio::net::TcpStream;

use crate::{ConnectionTarget, Connector};

/// A [`Connector`] that dials plain TCP.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, target: &ConnectionTarget) -> std::io::Result<TcpStream> {
        let stream = TcpStream::connect((target.host(), target.port())).await?;
        // Moves are tiny and latency-sensitive.
        stream.set_nodelay(true)?;
        tracing::debug!(%target, peer = ?stream.peer_addr().ok(), "tcp connected");
        Ok(stream)
    }
}
