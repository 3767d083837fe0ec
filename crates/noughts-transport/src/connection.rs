//! Live connections: the per-connection I/O worker and its handle.
//!
//! ```text
//!   controller ──send/close──▶ TransportHandle ──mpsc──▶ worker task ──▶ socket
//!   controller ◀──────────── TransportEvent (mpsc) ◀──── worker task ◀── socket
//! ```
//!
//! The worker is the only code that touches the socket. It reports exactly
//! one event per transition, in order: `Opened`, any number of `Received`,
//! at most one `Error`, then `Closed`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;

use crate::{
    ConnectError, ConnectionId, ConnectionTarget, Connector, LineCodec, TransportError,
};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// A lifecycle event raised by a connection's I/O worker.
#[derive(Debug)]
pub enum TransportEvent {
    /// The worker is running and will deliver messages.
    Opened(ConnectionId),
    /// One complete message, terminator stripped.
    Received(ConnectionId, String),
    /// A mid-session I/O failure. Always followed by `Closed`.
    Error(ConnectionId, TransportError),
    /// The connection is gone. Last event for this id.
    Closed(ConnectionId),
}

impl TransportEvent {
    /// The connection this event belongs to.
    pub fn connection_id(&self) -> ConnectionId {
        match self {
            Self::Opened(id) | Self::Received(id, _) | Self::Error(id, _) | Self::Closed(id) => {
                *id
            }
        }
    }
}

/// Where workers deliver their events. One listener per client.
pub type EventSender = mpsc::UnboundedSender<TransportEvent>;

/// Dials `target` and waits at most `timeout` for the link.
///
/// No retry happens here.
pub async fn connect<C: Connector>(
    connector: &C,
    target: &ConnectionTarget,
    timeout: Duration,
) -> Result<C::Stream, ConnectError> {
    match tokio::time::timeout(timeout, connector.connect(target)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(source)) => Err(ConnectError::Refused {
            target: target.to_string(),
            source,
        }),
        Err(_) => Err(ConnectError::TimedOut {
            target: target.to_string(),
            timeout,
        }),
    }
}

/// Starts the I/O worker for an established stream.
///
/// `read_buffer_bytes` sizes the initial read buffer. Events go to `events`;
/// the returned handle is the only way to write to or close the connection.
pub fn open<S>(stream: S, read_buffer_bytes: usize, events: EventSender) -> TransportHandle
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let shutdown = CancellationToken::new();

    tokio::spawn(run_connection(
        id,
        stream,
        read_buffer_bytes,
        outbound_rx,
        shutdown.clone(),
        events,
    ));

    TransportHandle {
        id,
        outbound: outbound_tx,
        shutdown,
    }
}

/// Owning handle to one live connection.
///
/// The handle never touches the socket itself. `send` queues text for the
/// worker, and `close` trips a [`CancellationToken`] the worker watches.
/// Both return immediately, so the owner can call them from inside its own
/// event loop without awaiting I/O.
///
/// The worker also trips the token when the peer goes away or I/O fails, so
/// [`is_connected`](Self::is_connected) turns `false` on its own and later
/// sends are dropped instead of piling up in the queue.
///
/// Dropping the handle closes the connection.
#[derive(Debug)]
pub struct TransportHandle {
    id: ConnectionId,
    outbound: mpsc::UnboundedSender<String>,
    shutdown: CancellationToken,
}

impl TransportHandle {
    /// Returns the unique identifier for this connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns `true` until the connection has been closed from either side.
    pub fn is_connected(&self) -> bool {
        !self.shutdown.is_cancelled() && !self.outbound.is_closed()
    }

    /// Queues a message for transmission. Silently dropped if the
    /// connection is already gone.
    pub fn send(&self, text: impl Into<String>) {
        if !self.is_connected() {
            tracing::trace!(conn_id = %self.id, "send on closed connection dropped");
            return;
        }
        let _ = self.outbound.send(text.into());
    }

    /// Closes the connection. Safe to call more than once.
    pub fn close(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for TransportHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// The I/O worker: owns the socket until it closes.
async fn run_connection<S>(
    id: ConnectionId,
    stream: S,
    read_buffer_bytes: usize,
    mut outbound: mpsc::UnboundedReceiver<String>,
    shutdown: CancellationToken,
    events: EventSender,
) where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let (reader, writer) = tokio::io::split(stream);
    let mut reader = FramedRead::with_capacity(reader, LineCodec::new(), read_buffer_bytes);
    let mut writer = FramedWrite::new(writer, LineCodec::new());

    tracing::debug!(conn_id = %id, "connection opened");
    let _ = events.send(TransportEvent::Opened(id));

    let outcome = loop {
        tokio::select! {
            biased;

            () = shutdown.cancelled() => break Ok("closed locally"),

            msg = outbound.recv() => match msg {
                Some(text) => {
                    tracing::trace!(conn_id = %id, %text, "sending");
                    if let Err(e) = writer.send(text).await {
                        break Err(TransportError::SendFailed(e));
                    }
                }
                None => break Ok("handle dropped"),
            },

            frame = reader.next() => match frame {
                Some(Ok(line)) => {
                    tracing::trace!(conn_id = %id, %line, "received");
                    let _ = events.send(TransportEvent::Received(id, line));
                }
                Some(Err(e)) => break Err(TransportError::ReceiveFailed(e)),
                None => break Ok("closed by peer"),
            },
        }
    };

    match outcome {
        Ok(reason) => tracing::debug!(conn_id = %id, reason, "connection closing"),
        Err(e) => {
            tracing::debug!(conn_id = %id, error = %e, "connection failed");
            let _ = events.send(TransportEvent::Error(id, e));
        }
    }

    shutdown.cancel();
    // Flushes anything buffered and shuts down the write half.
    let _ = SinkExt::<String>::close(&mut writer).await;
    let _ = events.send(TransportEvent::Closed(id));
}
