//! The decision seam: who picks our moves.
//!
//! The controller never decides where to play. When the server says it is
//! our turn, the controller waits out the thinking delay and then asks a
//! [`DecisionAgent`] exactly once. Whatever comes back goes through the same
//! validation as a human click, so a buggy agent can at worst waste a turn.
//! It can never send an illegal move.
//!
//! ```text
//!   YOUR_TURN ──▶ thinking delay ──▶ choose_move ──▶ validate ──▶ send
//!                                         │              │
//!                                       None         rejected
//!                                         └──── idle until next push
//! ```

use noughts_protocol::{Board, Mark};

/// Chooses a move for `player` on `board`.
///
/// Called from the controller task, so implementations should return
/// promptly; the thinking delay has already been waited out by the time
/// this runs.
///
/// Implement this for a robot player. A plain closure with the right
/// signature works too:
///
/// ```rust
/// use noughts_client::DecisionAgent;
/// use noughts_protocol::{Board, Mark};
///
/// let first_free = |board: &Board, _: Mark| board.empty_cells().next();
/// assert_eq!(first_free.choose_move(&Board::default(), Mark::X), Some(0));
/// ```
pub trait DecisionAgent: Send + Sync + 'static {
    /// Returns the cell index (0-8) to play, or `None` to pass.
    ///
    /// `board` is the last state the server pushed and `player` is the mark
    /// this client plays. Returning `None` sends nothing; the client then
    /// idles until the server pushes the next state. An index that is
    /// occupied or off the board is dropped by validation.
    fn choose_move(&self, board: &Board, player: Mark) -> Option<usize>;
}

/// Any matching closure is an agent.
impl<F> DecisionAgent for F
where
    F: Fn(&Board, Mark) -> Option<usize> + Send + Sync + 'static,
{
    fn choose_move(&self, board: &Board, player: Mark) -> Option<usize> {
        self(board, player)
    }
}
