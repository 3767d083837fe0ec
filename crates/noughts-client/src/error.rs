//! Error types for the client layer.

use noughts_transport::ConnectError;

/// Errors returned by [`ClientHandle`](crate::ClientHandle) methods.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The controller task has stopped.
    #[error("client controller is unavailable")]
    Unavailable,

    /// The connect request was rejected before reaching the controller.
    #[error(transparent)]
    InvalidTarget(#[from] ConnectError),
}

/// Why a proposed move was not committed.
///
/// Produced by move validation for both agent answers and cell clicks.
/// A rejection is never sent to the server or shown to the user. The
/// controller logs it at debug level and carries on, because the usual
/// cause is a stale trigger (a late click, a duplicate timer) rather than a
/// real mistake.
///
/// Checks run in a fixed order, so a move that breaks several rules reports
/// the first one: game over, then turn, then range, then occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    /// The index is not one of the nine board cells.
    #[error("cell {0} is outside the board")]
    OutOfRange(usize),

    /// The cell already holds a mark.
    #[error("cell {0} is occupied")]
    Occupied(usize),

    /// The last snapshot does not say `YOUR_TURN`.
    #[error("not your turn")]
    NotYourTurn,

    /// A terminal status was seen, or the board itself shows a win or a
    /// full grid.
    #[error("game is over")]
    GameOver,
}
