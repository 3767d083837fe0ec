//! The game snapshot and its transcoder.
//!
//! A [`GameSnapshot`] is the whole game as one side sees it: which mark it
//! plays, the status, and the board. The server pushes one after every
//! change; the client answers with the same shape plus the cell it picked.

use serde::{Deserialize, Serialize};

use crate::{Board, Codec, Mark, ProtocolError, Status, BOARD_CELLS};

/// An immutable game-state value, received from or about to be sent to the
/// server.
///
/// On the wire (JSON grammar):
///
/// ```text
/// {"player":"X","status":"YOUR_TURN","board":["EMPTY", ... ×9],"move":4}
/// ```
///
/// `move` is only present on outbound snapshots that carry a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Which side the receiving client plays.
    pub player: Mark,

    /// Game status from the receiving client's point of view.
    pub status: Status,

    /// The nine cells.
    pub board: Board,

    /// The cell being proposed, on outbound snapshots only.
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub pending_move: Option<usize>,
}

impl GameSnapshot {
    /// A snapshot without a pending move.
    pub fn new(player: Mark, status: Status, board: Board) -> Self {
        Self {
            player,
            status,
            board,
            pending_move: None,
        }
    }

    /// Checks the rules the type system doesn't: a pending move must
    /// address a board cell.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        match self.pending_move {
            Some(index) if index >= BOARD_CELLS => Err(ProtocolError::InvalidMessage(
                format!("move {index} is outside the board"),
            )),
            _ => Ok(()),
        }
    }
}

/// Parses one message into a snapshot.
///
/// # Errors
/// `ProtocolError::Decode` for malformed structure (missing field, wrong
/// board size, unknown status token), `ProtocolError::InvalidMessage` for a
/// move index outside 0–8.
pub fn decode(codec: &impl Codec, text: &str) -> Result<GameSnapshot, ProtocolError> {
    let snapshot: GameSnapshot = codec.decode(text)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Serializes a snapshot, including `move` only when one is pending.
pub fn encode(codec: &impl Codec, snapshot: &GameSnapshot) -> Result<String, ProtocolError> {
    snapshot.validate()?;
    codec.encode(snapshot)
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{Cell, JsonCodec};

    fn sample() -> GameSnapshot {
        let mut board = Board::default();
        board.set(0, Cell::O);
        board.set(4, Cell::X);
        GameSnapshot::new(Mark::X, Status::YourTurn, board)
    }

    #[test]
    fn test_encode_omits_move_when_absent() {
        let text = encode(&JsonCodec, &sample()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(json.get("move").is_none());
        assert_eq!(json["player"], "X");
        assert_eq!(json["status"], "YOUR_TURN");
        assert_eq!(json["board"][0], "O");
        assert_eq!(json["board"][1], "EMPTY");
    }

    #[test]
    fn test_round_trip_with_pending_move() {
        let mut snapshot = sample();
        snapshot.pending_move = Some(8);
        let text = encode(&JsonCodec, &snapshot).unwrap();
        assert!(text.contains(r#""move":8"#));
        assert_eq!(decode(&JsonCodec, &text).unwrap(), snapshot);
    }

    #[test]
    fn test_round_trip_without_pending_move() {
        let snapshot = sample();
        let text = encode(&JsonCodec, &snapshot).unwrap();
        let decoded = decode(&JsonCodec, &text).unwrap();
        assert_eq!(decoded, snapshot);
        assert_eq!(decoded.pending_move, None);
    }

    #[test]
    fn test_decode_server_message() {
        let text = r#"{"player":"O","status":"WAIT","board":["X","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY"]}"#;
        let snapshot = decode(&JsonCodec, text).unwrap();
        assert_eq!(snapshot.player, Mark::O);
        assert_eq!(snapshot.status, Status::Wait);
        assert_eq!(snapshot.board.get(0), Some(Cell::X));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode(&JsonCodec, "not-a-valid-message");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_missing_status() {
        let text = r#"{"player":"X","board":["EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY"]}"#;
        assert!(matches!(
            decode(&JsonCodec, text),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_status() {
        let text = r#"{"player":"X","status":"PAUSED","board":["EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY"]}"#;
        assert!(decode(&JsonCodec, text).is_err());
    }

    #[test]
    fn test_decode_rejects_ten_cells() {
        let text = r#"{"player":"X","status":"WAIT","board":["EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY"]}"#;
        assert!(decode(&JsonCodec, text).is_err());
    }

    #[test]
    fn test_decode_rejects_move_outside_board() {
        let text = r#"{"player":"X","status":"WAIT","board":["EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY","EMPTY"],"move":9}"#;
        assert!(matches!(
            decode(&JsonCodec, text),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_encode_rejects_move_outside_board() {
        let mut snapshot = sample();
        snapshot.pending_move = Some(12);
        assert!(encode(&JsonCodec, &snapshot).is_err());
    }
}
