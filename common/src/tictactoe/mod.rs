mod board;
mod game_state;
mod player;

pub use board::{Board, Cell, CellIndex, CellIndexError, Line, BOARD_SIZE, LINES, ROW_LEN};
pub use game_state::{evaluate, GameState, Outcome, Status};
pub use player::Player;
