use crate::logic::board::Board;
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;

#[cfg(test)]
mod bench_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimit {
    Depth(u8),
    Time(u64), // milliseconds
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    /// Root value, positive favours North.
    pub score: i32,
}

/// Static evaluation of a position. Positive scores favour North.
pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, board: &Board) -> i32 {
        (**self).evaluate(board)
    }
}

pub trait Searcher {
    /// Best pit for the side to move, or `None` when there is nothing to play.
    fn search(&mut self, game_state: &GameState, limit: SearchLimit) -> Option<(usize, SearchStats)>;
}
