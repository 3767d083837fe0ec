//! Client timing and buffer settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for a client session.
///
/// The defaults are the values the client is meant to run with; tests
/// shrink them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// How long a single connect attempt may take.
    pub connect_timeout: Duration,

    /// Pause between losing a connection and dialling again.
    pub reconnect_delay: Duration,

    /// Pause between being told it is our turn and asking the agent for a
    /// move, so the robot doesn't answer inhumanly fast.
    pub thinking_delay: Duration,

    /// Initial capacity of each connection's read buffer.
    pub read_buffer_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(30_000),
            reconnect_delay: Duration::from_millis(500),
            thinking_delay: Duration::from_millis(1_000),
            read_buffer_bytes: 2048,
        }
    }
}
