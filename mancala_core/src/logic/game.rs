use crate::logic::board::{Board, Side};
use crate::logic::rules::{self, validate_move, MoveError};
use serde::{Deserialize, Serialize};

/// Final score of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub south_store: u8,
    pub north_store: u8,
    /// `None` on a draw.
    pub winner: Option<Side>,
}

impl GameResult {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            south_store: board.store(Side::South),
            north_store: board.store(Side::North),
            winner: board.leader(),
        }
    }

    /// Absolute store difference.
    #[must_use]
    pub const fn margin(&self) -> u8 {
        self.south_store.abs_diff(self.north_store)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Finished(GameResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub pit: usize,
    pub side: Side,
    pub extra_turn: bool,
    pub captured: u8,
    pub stones_sown: u8,
    pub note: Option<String>, // For AI stats or other info
    // Position before the move, for undo.
    board_before: Board,
    status_before: GameStatus,
}

/// Authoritative game: board, side to move and move history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Side,
    pub status: GameStatus,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard opening, South to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::South)
    }

    /// Game starting from an arbitrary position. A terminal board is swept
    /// and the game is finished immediately.
    #[must_use]
    pub fn from_board(board: Board, turn: Side) -> Self {
        let mut state = Self {
            board,
            turn,
            status: GameStatus::Playing,
            history: Vec::new(),
        };
        state.update_status();
        state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished(_))
    }

    #[must_use]
    pub const fn result(&self) -> Option<GameResult> {
        match self.status {
            GameStatus::Playing => None,
            GameStatus::Finished(result) => Some(result),
        }
    }

    /// # Errors
    /// See [`Self::make_move_with_steps`].
    pub fn make_move(&mut self, pit: usize) -> Result<MoveRecord, MoveError> {
        self.make_move_with_steps(pit, |_| {})
    }

    /// Plays `pit` for the side to move, reporting every stone drop to `on_step`.
    ///
    /// The turn passes to the opponent unless the last stone landed in the
    /// mover's store.
    ///
    /// # Errors
    /// `GameOver` once the game has finished, otherwise the rule the move
    /// breaks. Rejected moves leave the game untouched.
    pub fn make_move_with_steps<F>(&mut self, pit: usize, on_step: F) -> Result<MoveRecord, MoveError>
    where
        F: FnMut(usize),
    {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        validate_move(&self.board, pit, self.turn)?;

        let board_before = self.board;
        let status_before = self.status;
        let side = self.turn;
        let effect = rules::sow(&mut self.board, pit, side, on_step);

        let record = MoveRecord {
            pit,
            side,
            extra_turn: effect.extra_turn,
            captured: effect.captured,
            stones_sown: effect.stones_sown,
            note: None,
            board_before,
            status_before,
        };
        self.history.push(record.clone());

        if !effect.extra_turn {
            self.turn = side.opposite();
        }
        self.update_status();

        Ok(record)
    }

    /// Ends the game when the side to move has nothing to sow.
    ///
    /// Returns `true` if the game is over afterwards.
    pub fn pass(&mut self) -> bool {
        if !self.is_over() && self.board.legal_moves(self.turn).is_empty() {
            self.board.finalize();
            self.finish();
        }
        self.is_over()
    }

    /// Attaches a note (search statistics, usually) to the latest move.
    pub fn annotate_last(&mut self, note: String) {
        if let Some(record) = self.history.last_mut() {
            record.note = Some(note);
        }
    }

    pub fn undo_move(&mut self) -> bool {
        if let Some(record) = self.history.pop() {
            self.board = record.board_before;
            self.turn = record.side;
            self.status = record.status_before;
            true
        } else {
            false
        }
    }

    fn update_status(&mut self) {
        if self.board.is_terminal() {
            self.board.finalize();
            self.finish();
        }
    }

    fn finish(&mut self) {
        let result = GameResult::from_board(&self.board);
        log::info!(
            "Game over after {} moves: South {} - North {} ({})",
            self.history.len(),
            result.south_store,
            result.north_store,
            result.winner.map_or("draw", Side::name)
        );
        self.status = GameStatus::Finished(result);
    }
}
