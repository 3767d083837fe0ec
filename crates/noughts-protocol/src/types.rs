//! Core game types carried inside a snapshot.
//!
//! Every type here is serialized with the upper-case tokens the server
//! speaks (`"X"`, `"EMPTY"`, `"YOUR_TURN"`), so the Rust names and the wire
//! names are decoupled through `#[serde(rename...)]` attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

// ---------------------------------------------------------------------------
// Mark / Cell
// ---------------------------------------------------------------------------

/// One of the two sides. The server assigns a mark to each client and it
/// never changes for the lifetime of that connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

/// The content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Returns `true` if nobody has played here yet.
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Self::X,
            Mark::O => Self::O,
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Game status as seen by the receiving client.
///
/// ```text
/// WAIT ⇄ YOUR_TURN → WON | LOST | DRAW | FORFEIT
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The opponent is thinking (or has not joined yet).
    Wait,
    /// The receiving client may place one mark.
    YourTurn,
    Won,
    Lost,
    Draw,
    /// The opponent left the game.
    Forfeit,
}

impl Status {
    /// Returns `true` for the four statuses that end a game.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Draw | Self::Forfeit)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wait => write!(f, "WAIT"),
            Self::YourTurn => write!(f, "YOUR_TURN"),
            Self::Won => write!(f, "WON"),
            Self::Lost => write!(f, "LOST"),
            Self::Draw => write!(f, "DRAW"),
            Self::Forfeit => write!(f, "FORFEIT"),
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The nine cells, row-major from the top-left corner:
///
/// ```text
///  0 | 1 | 2
///  3 | 4 | 5
///  6 | 7 | 8
/// ```
///
/// Backed by a fixed-size array, so a board with any other number of cells
/// cannot be deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Cell; BOARD_CELLS]);

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl Board {
    /// Creates a board from its cells.
    pub fn new(cells: [Cell; BOARD_CELLS]) -> Self {
        Self(cells)
    }

    /// Returns the cell at `index`, or `None` outside 0–8.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.0.get(index).copied()
    }

    /// Writes `cell` at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, cell: Cell) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = cell;
        }
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.0
    }

    /// Indices of every empty cell, ascending.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
    }

    /// The mark that owns a full row, column or diagonal, if any.
    pub fn winner(&self) -> Option<Mark> {
        [Mark::X, Mark::O].into_iter().find(|&mark| {
            let cell = Cell::from(mark);
            LINES
                .iter()
                .any(|line| line.iter().all(|&i| self.0[i] == cell))
        })
    }

    /// Returns `true` if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.0.iter().all(|c| !c.is_empty())
    }

    /// Returns `true` once the board alone shows the game has ended.
    pub fn is_finished(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// The winning lines of the board, as index triples. Decision agents use
    /// these to look for wins and blocks.
    pub fn lines() -> &'static [[usize; 3]; 8] {
        &LINES
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells().chunks(3).enumerate() {
            if row > 0 {
                f.write_str("/")?;
            }
            for cell in cells {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::X => 'X',
                    Cell::O => 'O',
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
