use crate::tictactoe::board::{Board, Cell, CellIndex, Line, LINES};
use crate::tictactoe::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Winner { player: Player, line: Line },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner { player, .. } => Some(*player),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Winner { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Scans the eight lines in order and reports the first one holding three
/// identical marks. A full board without such a line is a draw.
pub fn evaluate(board: &Board) -> Outcome {
    for line in LINES {
        let [a, b, c] = line;
        if let Some(player) = board.get(a).player() {
            if board.get(b) == board.get(a) && board.get(c) == board.get(a) {
                return Outcome::Winner { player, line };
            }
        }
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// The text shown above the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    NextPlayer(Player),
    Winner(Player),
    Draw,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NextPlayer(player) => write!(f, "Next player: {}", player),
            Status::Winner(player) => write!(f, "Winner: {}", player),
            Status::Draw => write!(f, "It's a draw!"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    next_player: Player,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            board: Board::new(),
            next_player: Player::first(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    // Always recomputed from the board, never cached
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    pub fn status(&self) -> Status {
        match self.outcome() {
            Outcome::InProgress => Status::NextPlayer(self.next_player),
            Outcome::Winner { player, .. } => Status::Winner(player),
            Outcome::Draw => Status::Draw,
        }
    }

    pub fn is_playable(&self, idx: CellIndex) -> bool {
        self.board.get(idx).is_empty() && !self.outcome().is_terminal()
    }

    /// Places the current player's mark at `idx` and hands the turn over.
    ///
    /// Moves onto a filled cell or into a finished game are ignored and leave
    /// the state untouched. Returns whether the move was accepted.
    pub fn apply_move(&mut self, idx: CellIndex) -> bool {
        if !self.is_playable(idx) {
            return false;
        }
        let player = self.next_player;
        self.board.set(idx, Cell::Marked { player });
        self.next_player = player.other();
        debug!(%player, cell = %idx, "move applied");

        let outcome = self.outcome();
        if outcome.is_terminal() {
            info!(?outcome, "game over");
        }
        true
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.next_player = Player::first();
        debug!("game reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::board::{BOARD_SIZE, ROW_LEN};

    fn idx(i: usize) -> CellIndex {
        CellIndex::new(i).unwrap()
    }

    fn play(moves: &[usize]) -> GameState {
        let mut game_state = GameState::new();
        for &m in moves {
            assert!(game_state.apply_move(idx(m)), "move {} rejected", m);
        }
        game_state
    }

    // Builds a board directly from a picture, bypassing turn order
    fn board_from(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let cell = match ch {
                    'X' => Cell::Marked { player: Player::X },
                    'O' => Cell::Marked { player: Player::O },
                    _ => Cell::Empty,
                };
                board.set(idx(r * ROW_LEN + c), cell);
            }
        }
        board
    }

    #[test]
    fn test_evaluate_every_line() {
        for line in LINES {
            for player in [Player::X, Player::O] {
                let mut board = Board::new();
                for i in line {
                    board.set(i, Cell::Marked { player });
                }
                assert_eq!(evaluate(&board), Outcome::Winner { player, line });
            }
        }
    }

    // Line-by-line reference scan used to cross-check `evaluate` on every board
    fn reference_outcome(board: &Board) -> Outcome {
        let complete = LINES.iter().find(|line| {
            let first = board.get(line[0]);
            !first.is_empty() && line.iter().all(|i| board.get(*i) == first)
        });
        match complete {
            Some(line) => Outcome::Winner {
                player: board.get(line[0]).player().unwrap(),
                line: *line,
            },
            None if board.filled_count() == BOARD_SIZE => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    #[test]
    fn test_evaluate_all_boards() {
        let cells = [
            Cell::Empty,
            Cell::Marked { player: Player::X },
            Cell::Marked { player: Player::O },
        ];
        let total = 3usize.pow(BOARD_SIZE as u32);
        let mut wins = 0;
        let mut draws = 0;
        for code in 0..total {
            let mut board = Board::new();
            let mut rest = code;
            for i in CellIndex::all() {
                board.set(i, cells[rest % 3]);
                rest /= 3;
            }
            let outcome = evaluate(&board);
            assert_eq!(outcome, reference_outcome(&board), "board:\n{}", board);
            match outcome {
                Outcome::Winner { player, line } => {
                    wins += 1;
                    assert!(line.iter().all(|i| board.get(*i).player() == Some(player)));
                }
                Outcome::Draw => {
                    draws += 1;
                    assert!(board.is_full());
                }
                Outcome::InProgress => assert!(!board.is_full()),
            }
        }
        assert!(wins > 0 && draws > 0);
    }

    #[test]
    fn test_evaluate_mixed_line_is_not_a_win() {
        let board = board_from(["XXO", "...", "..."]);
        assert_eq!(evaluate(&board), Outcome::InProgress);
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_evaluate_first_line_wins() {
        // Top row and left column both complete; rows are scanned first
        let board = board_from(["XXX", "XOO", "XOO"]);
        assert_eq!(
            evaluate(&board),
            Outcome::Winner {
                player: Player::X,
                line: [idx(0), idx(1), idx(2)],
            }
        );
    }

    #[test]
    fn test_evaluate_win_on_full_board() {
        let board = board_from(["XOX", "OXO", "OXX"]);
        let outcome = evaluate(&board);
        assert_eq!(outcome.winner(), Some(Player::X));
        assert_eq!(outcome.line(), Some([idx(0), idx(4), idx(8)]));
    }

    #[test]
    fn test_evaluate_draw() {
        let board = board_from(["XOX", "XOO", "OXX"]);
        assert_eq!(evaluate(&board), Outcome::Draw);
        assert!(Outcome::Draw.is_terminal());
        assert_eq!(Outcome::Draw.line(), None);
    }

    #[test]
    fn test_new_game() {
        let game_state = GameState::new();
        assert_eq!(game_state.board(), &Board::new());
        assert_eq!(game_state.next_player(), Player::X);
        assert_eq!(game_state.outcome(), Outcome::InProgress);
        assert_eq!(game_state.status().to_string(), "Next player: X");
    }

    #[test]
    fn test_apply_move() {
        let mut game_state = play(&[4]);
        let before = *game_state.board();
        assert_eq!(game_state.next_player(), Player::O);

        assert!(game_state.apply_move(idx(0)));
        assert_eq!(game_state.board().get(idx(0)), Cell::Marked { player: Player::O });
        assert_eq!(game_state.next_player(), Player::X);
        for i in CellIndex::all().filter(|i| *i != idx(0)) {
            assert_eq!(game_state.board().get(i), before.get(i));
        }
        assert_eq!(game_state.status().to_string(), "Next player: X");
    }

    #[test]
    fn test_apply_move_on_filled_cell() {
        let mut game_state = play(&[4, 0]);
        let before = game_state.clone();
        assert!(!game_state.is_playable(idx(4)));
        assert!(!game_state.apply_move(idx(4)));
        assert!(!game_state.apply_move(idx(0)));
        assert_eq!(game_state, before);
    }

    #[test]
    fn test_turn_tracks_filled_count() {
        let mut game_state = GameState::new();
        for m in [4, 0, 4, 8, 2, 2, 6] {
            game_state.apply_move(idx(m));
            let expected = if game_state.board().filled_count() % 2 == 0 {
                Player::X
            } else {
                Player::O
            };
            assert_eq!(game_state.next_player(), expected);
        }
    }

    #[test]
    fn test_top_row_win() {
        let mut game_state = play(&[0, 3, 1, 4, 2]);
        assert_eq!(
            game_state.outcome(),
            Outcome::Winner {
                player: Player::X,
                line: [idx(0), idx(1), idx(2)],
            }
        );
        assert_eq!(game_state.status().to_string(), "Winner: X");

        // Terminal state is a sink until reset
        let before = game_state.clone();
        for i in CellIndex::all() {
            assert!(!game_state.is_playable(i));
            assert!(!game_state.apply_move(i));
        }
        assert_eq!(game_state, before);
    }

    #[test]
    fn test_o_wins_column() {
        let game_state = play(&[0, 1, 3, 4, 8, 7]);
        assert_eq!(game_state.outcome().winner(), Some(Player::O));
        assert_eq!(game_state.outcome().line(), Some([idx(1), idx(4), idx(7)]));
        assert_eq!(game_state.status(), Status::Winner(Player::O));
    }

    #[test]
    fn test_draw() {
        // X O X
        // X O O
        // O X X
        let mut game_state = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(game_state.outcome(), Outcome::Draw);
        assert_eq!(game_state.status().to_string(), "It's a draw!");
        assert!(game_state.board().is_full());
        assert!(!game_state.apply_move(idx(0)));
    }

    #[test]
    fn test_reset() {
        let mut mid_game = play(&[4, 0, 8]);
        mid_game.reset();
        assert_eq!(mid_game, GameState::new());

        let mut won = play(&[0, 3, 1, 4, 2]);
        won.reset();
        assert_eq!(won, GameState::new());
        assert_eq!(won.outcome(), Outcome::InProgress);
        assert!(won.apply_move(idx(4)));
        assert_eq!(won.board().get(idx(4)).player(), Some(Player::X));

        let mut fresh = GameState::new();
        fresh.reset();
        assert_eq!(fresh, GameState::new());
    }

    #[test]
    fn test_serialize_snapshot() {
        let game_state = play(&[4]);
        let value = serde_json::to_value(&game_state).unwrap();
        assert_eq!(value["next_player"], "O");
        assert_eq!(value["board"][4]["Marked"]["player"], "X");
        assert_eq!(value["board"][0], "Empty");

        let restored: GameState = serde_json::from_value(value).unwrap();
        assert_eq!(restored, game_state);
    }
}
