//! # Noughts
//!
//! Client for networked noughts-and-crosses.
//!
//! The server owns the game; this client connects over a line-oriented
//! stream, mirrors the authoritative board, and sends one move per turn,
//! either from cell clicks or from a [`DecisionAgent`] after a short
//! thinking delay. Lost connections are retried until the user aborts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noughts::prelude::*;
//!
//! struct Log;
//! impl PresentationSink for Log {
//!     fn redraw(&self) {}
//!     fn show_info(&self, text: &str) { println!("{text}"); }
//!     fn set_connection_controls_enabled(&self, _: bool) {}
//!     fn set_abort_enabled(&self, _: bool) {}
//! }
//!
//! # async fn run() -> Result<(), NoughtsError> {
//! let client = ClientBuilder::new()
//!     .agent(|board: &Board, _: Mark| board.empty_cells().next())
//!     .spawn(TcpConnector, Log);
//! client.request_connect("127.0.0.1", 9000)?;
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::NoughtsError;

pub use noughts_client as client;
pub use noughts_protocol as protocol;
pub use noughts_transport as transport;

/// Common imports for building a client.
pub mod prelude {
    pub use crate::NoughtsError;
    pub use noughts_client::{
        ClientBuilder, ClientConfig, ClientError, ClientHandle, DecisionAgent, MoveRejection,
        Phase, PresentationSink, DISCONNECTED_INFO,
    };
    pub use noughts_protocol::{Board, Cell, GameSnapshot, Mark, Status, BOARD_CELLS};
    pub use noughts_transport::{ConnectError, ConnectionTarget, Connector, TcpConnector};
}
