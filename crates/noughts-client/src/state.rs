//! Session state and the controller's phase machine.

use noughts_protocol::{GameSnapshot, Status, BOARD_CELLS};
use noughts_transport::{ConnectionId, ConnectionTarget, TransportHandle};

use crate::MoveRejection;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where the controller is in a session.
///
/// ```text
///                 connect intent          opened
/// Disconnected ─────────────────▶ Connecting ──────▶ WaitingServer
///      ▲   ▲                          │               │        ▲
///      │   └──── connect failure ─────┘     YOUR_TURN │        │ move sent /
///      │                                              ▼        │ WAIT
///      │                                            MyTurn ────┘
///      │                                              │
///      │                  WON/LOST/DRAW/FORFEIT       ▼
///      └──── closed / abort (from any phase) ───── GameOver
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Disconnected,
    Connecting,
    /// Connected; the server has the next word.
    WaitingServer,
    /// The server said it is our turn and no move has been sent yet.
    MyTurn,
    /// A terminal status arrived on this connection.
    GameOver,
}

impl Phase {
    /// Returns `true` while a transport connection exists.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::WaitingServer | Self::MyTurn | Self::GameOver)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Connecting => write!(f, "Connecting"),
            Self::WaitingServer => write!(f, "WaitingServer"),
            Self::MyTurn => write!(f, "MyTurn"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Everything the controller knows about the current session. Owned by the
/// controller task alone.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    /// Last reconciled snapshot; `None` before the first message and after
    /// every close.
    pub(crate) snapshot: Option<GameSnapshot>,

    /// Last target the user connected to, kept for reconnection.
    pub(crate) target: Option<ConnectionTarget>,

    /// Cleared only by an abort.
    pub(crate) auto_reconnect: bool,

    /// The single live connection, if any.
    pub(crate) transport: Option<TransportHandle>,

    /// A terminal status was seen on the current connection.
    pub(crate) game_over: bool,
}

impl SessionState {
    /// Returns `true` if `id` is the live connection.
    pub(crate) fn is_active(&self, id: ConnectionId) -> bool {
        self.transport.as_ref().is_some_and(|t| t.id() == id)
    }

    /// Forgets everything tied to the current connection. Target and
    /// reconnect preference survive.
    pub(crate) fn reset_connection(&mut self) {
        if let Some(transport) = self.transport.take() {
            transport.close();
        }
        self.snapshot = None;
        self.game_over = false;
    }
}

/// Checks whether placing our mark on `cell` is allowed right now.
pub(crate) fn validate_move(
    snapshot: &GameSnapshot,
    cell: usize,
    game_over: bool,
) -> Result<(), MoveRejection> {
    if game_over || snapshot.status.is_terminal() || snapshot.board.is_finished() {
        return Err(MoveRejection::GameOver);
    }
    if snapshot.status != Status::YourTurn {
        return Err(MoveRejection::NotYourTurn);
    }
    if cell >= BOARD_CELLS {
        return Err(MoveRejection::OutOfRange(cell));
    }
    if !snapshot.board.get(cell).is_some_and(|c| c.is_empty()) {
        return Err(MoveRejection::Occupied(cell));
    }
    Ok(())
}
