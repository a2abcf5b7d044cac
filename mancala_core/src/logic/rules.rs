use crate::logic::board::{Board, Side, SLOT_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    GameOver,
    PitOutOfRange(usize),
    NotOwnPit { pit: usize, side: Side },
    EmptyPit(usize),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => write!(f, "game is already over"),
            Self::PitOutOfRange(pit) => write!(f, "pit {pit} is off the board"),
            Self::NotOwnPit { pit, side } => write!(f, "slot {pit} is not one of {side}'s pits"),
            Self::EmptyPit(pit) => write!(f, "pit {pit} is empty"),
        }
    }
}

impl std::error::Error for MoveError {}

/// What happened during a single sowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveEffect {
    pub extra_turn: bool,
    /// Stones banked by a capture, the capturing stone included.
    pub captured: u8,
    pub stones_sown: u8,
    pub last_index: usize,
}

/// Checks that `side` may sow from `pit`.
///
/// # Errors
/// The first rule the move breaks.
pub fn validate_move(board: &Board, pit: usize, side: Side) -> Result<(), MoveError> {
    if pit >= SLOT_COUNT {
        return Err(MoveError::PitOutOfRange(pit));
    }
    if !side.owns_pit(pit) {
        return Err(MoveError::NotOwnPit { pit, side });
    }
    if board.stones(pit) == 0 {
        return Err(MoveError::EmptyPit(pit));
    }
    Ok(())
}

/// Sows from `pit` for `side` and returns whether `side` moves again.
///
/// # Panics
/// When the move is not legal. Callers pick `pit` from
/// [`Board::legal_moves`] or check it with [`validate_move`] first.
pub fn apply_move(board: &mut Board, pit: usize, side: Side) -> bool {
    sow(board, pit, side, |_| {}).extra_turn
}

/// Like [`apply_move`], calling `on_step` with each slot right after a stone
/// lands in it. The callback only observes the move.
///
/// # Panics
/// When the move is not legal.
pub fn apply_move_with_steps<F>(board: &mut Board, pit: usize, side: Side, on_step: F) -> bool
where
    F: FnMut(usize),
{
    sow(board, pit, side, on_step).extra_turn
}

/// Full sowing with capture, extra-turn and end-of-game handling.
///
/// # Panics
/// When the move is not legal.
pub fn sow<F>(board: &mut Board, pit: usize, side: Side, mut on_step: F) -> MoveEffect
where
    F: FnMut(usize),
{
    if let Err(err) = validate_move(board, pit, side) {
        panic!("illegal move for {side}: {err}");
    }

    let stones = board.take(pit);

    // Own pits lead the ring, so the pit offset is the ring position.
    let start = pit - side.first_pit() + 1;
    let mut last = pit;
    for &slot in side.ring().iter().cycle().skip(start).take(usize::from(stones)) {
        board.add(slot, 1);
        on_step(slot);
        last = slot;
    }

    let mut effect = MoveEffect {
        extra_turn: last == side.store(),
        captured: 0,
        stones_sown: stones,
        last_index: last,
    };

    if side.owns_pit(last) && board.stones(last) == 1 {
        let facing = Board::opposite(last);
        let loot = board.take(facing);
        if loot > 0 {
            let captured = loot + board.take(last);
            board.add(side.store(), captured);
            effect.captured = captured;
        }
    }

    board.finalize();
    effect
}
