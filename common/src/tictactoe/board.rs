use crate::tictactoe::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const ROW_LEN: usize = 3;
pub const BOARD_SIZE: usize = ROW_LEN * ROW_LEN;

#[derive(Error, Debug, PartialEq)]
pub enum CellIndexError {
    #[error("Cell index {index} exceeds the maximum of {max}")]
    OutOfBounds { index: usize, max: usize },
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Marked { player: Player },
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::Marked { player } => Some(*player),
            Cell::Empty => None,
        }
    }
}

/// Row-major position of a cell on the 3x3 grid.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(usize);

impl CellIndex {
    pub fn new(index: usize) -> Result<Self, CellIndexError> {
        if index >= BOARD_SIZE {
            return Err(CellIndexError::OutOfBounds {
                index,
                max: BOARD_SIZE - 1,
            });
        }
        Ok(CellIndex(index))
    }

    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..BOARD_SIZE).map(CellIndex)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    pub fn row(&self) -> usize {
        self.0 / ROW_LEN
    }

    pub fn col(&self) -> usize {
        self.0 % ROW_LEN
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = CellIndexError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        CellIndex::new(index)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type Line = [CellIndex; 3];

// Scan order matters: the first complete line is reported as the winning one
pub const LINES: [Line; 8] = [
    // Rows
    [CellIndex(0), CellIndex(1), CellIndex(2)],
    [CellIndex(3), CellIndex(4), CellIndex(5)],
    [CellIndex(6), CellIndex(7), CellIndex(8)],
    // Columns
    [CellIndex(0), CellIndex(3), CellIndex(6)],
    [CellIndex(1), CellIndex(4), CellIndex(7)],
    [CellIndex(2), CellIndex(5), CellIndex(8)],
    // Diagonals
    [CellIndex(0), CellIndex(4), CellIndex(8)],
    [CellIndex(2), CellIndex(4), CellIndex(6)],
];

#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board([Cell; BOARD_SIZE]);

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    pub fn get(&self, idx: CellIndex) -> Cell {
        self.0[idx.0]
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|c| !c.is_empty())
    }

    pub fn filled_count(&self) -> usize {
        self.0.iter().filter(|c| !c.is_empty()).count()
    }

    // Only the game state may write cells, so empty -> marked is the only transition
    pub(crate) fn set(&mut self, idx: CellIndex, cell: Cell) {
        self.0[idx.0] = cell;
    }

    pub(crate) fn clear(&mut self) {
        self.0 = [Cell::Empty; BOARD_SIZE];
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks(ROW_LEN) {
            let line = row
                .iter()
                .map(|c| match c.player() {
                    Some(player) => player.to_string(),
                    None => ".".to_string(),
                })
                .collect::<Vec<String>>()
                .join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
