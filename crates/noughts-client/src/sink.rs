//! The presentation seam: what the controller tells the UI.
//!
//! The controller never renders anything. It calls these four methods and
//! the UI decides what they look like. Current state is read separately
//! through [`ClientHandle::snapshot`](crate::ClientHandle::snapshot).

use noughts_protocol::{GameSnapshot, Status};

/// Info text shown whenever the session drops to disconnected.
pub const DISCONNECTED_INFO: &str = "Disconnected.";

/// Receives UI notifications from the controller.
///
/// Called from the controller task, so implementations must be cheap and
/// must not block.
pub trait PresentationSink: Send + Sync + 'static {
    /// The board or status changed; read the new snapshot and repaint.
    fn redraw(&self);

    /// Replace the status line.
    fn show_info(&self, text: &str);

    /// Enable or disable the host/port inputs and the connect button.
    fn set_connection_controls_enabled(&self, enabled: bool);

    /// Enable or disable the abort button.
    fn set_abort_enabled(&self, enabled: bool);
}

impl<T: PresentationSink + ?Sized> PresentationSink for std::sync::Arc<T> {
    fn redraw(&self) {
        (**self).redraw();
    }

    fn show_info(&self, text: &str) {
        (**self).show_info(text);
    }

    fn set_connection_controls_enabled(&self, enabled: bool) {
        (**self).set_connection_controls_enabled(enabled);
    }

    fn set_abort_enabled(&self, enabled: bool) {
        (**self).set_abort_enabled(enabled);
    }
}

/// The plain-language status line for a snapshot, e.g.
/// `"Player X: Your turn!"`.
pub fn status_info(snapshot: &GameSnapshot) -> String {
    let phrase = match snapshot.status {
        Status::Wait => "Waiting for the opponent...",
        Status::YourTurn => "Your turn!",
        Status::Won => "Congratulations, you won!",
        Status::Lost => "Sorry, you lost. Keep practising!",
        Status::Draw => "It's a draw!",
        Status::Forfeit => "The opponent abandoned the game.",
    };
    format!("Player {}: {phrase}", snapshot.player)
}
