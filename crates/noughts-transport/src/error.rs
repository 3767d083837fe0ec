use std::time::Duration;

/// Errors raised while establishing a connection.
///
/// None of these are retried inside the transport; the controller decides
/// whether to try again.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The host/port pair is not acceptable.
    #[error("invalid connection target: {0}")]
    InvalidTarget(String),

    /// The peer refused the connection or the address did not resolve.
    #[error("connect to {target} failed: {source}")]
    Refused {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// No connection within the configured timeout.
    #[error("connect to {target} timed out after {timeout:?}")]
    TimedOut { target: String, timeout: Duration },
}

/// Errors raised on an established connection.
///
/// An orderly close from either side is not an error: it surfaces only as
/// `TransportEvent::Closed`. These variants describe I/O failures, and the
/// worker always closes the connection after reporting one.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),
}
