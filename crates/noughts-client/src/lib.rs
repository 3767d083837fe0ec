//! Turn synchronization controller for the noughts client.
//!
//! A [`ClientHandle`] fronts one controller task that:
//!
//! 1. **Connects**: dials the server through a
//!    [`Connector`](noughts_transport::Connector), reconnecting after every
//!    close until the user aborts.
//! 2. **Reconciles**: replaces its local [`GameSnapshot`] with each one the
//!    server pushes and tells the [`PresentationSink`].
//! 3. **Plays**: on our turn, waits the thinking delay, asks the
//!    [`DecisionAgent`] once, validates the answer and sends it.
//!
//! # How it fits in the stack
//!
//! ```text
//! UI (PresentationSink / intents)  ⇄  Controller (this crate)
//!                                        ↕
//!                   Protocol (GameSnapshot)  +  Transport (lines, events)
//! ```

mod agent;
mod client;
mod config;
mod controller;
mod error;
mod sink;
mod state;

pub use agent::DecisionAgent;
pub use client::{ClientBuilder, ClientHandle};
pub use config::ClientConfig;
pub use error::{ClientError, MoveRejection};
pub use sink::{status_info, PresentationSink, DISCONNECTED_INFO};
pub use state::Phase;

pub use noughts_protocol::GameSnapshot;
