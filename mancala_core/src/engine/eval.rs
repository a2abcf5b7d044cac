use crate::engine::config::{EngineConfig, EvaluatorKind};
use crate::engine::Evaluator;
use crate::logic::board::{Board, Side};

fn count(stones: u32) -> i32 {
    i32::try_from(stones).unwrap_or(i32::MAX)
}

/// Banked stones weigh heavily, stones still on a side's pits lightly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialEvaluator {
    store_weight: i32,
    pit_weight: i32,
}

impl Default for MaterialEvaluator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl MaterialEvaluator {
    #[must_use]
    pub const fn new(store_weight: i32, pit_weight: i32) -> Self {
        Self {
            store_weight,
            pit_weight,
        }
    }

    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.store_weight, config.pit_weight)
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let stores = i32::from(board.store(Side::North)) - i32::from(board.store(Side::South));
        let pits = count(board.pit_total(Side::North)) - count(board.pit_total(Side::South));
        stores * self.store_weight + pits * self.pit_weight
    }
}

/// Scores finished games as a flat win, draw or loss.
///
/// Unfinished boards fall back to the plain store differential, which keeps
/// the same sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeEvaluator {
    win_score: i32,
}

impl Default for OutcomeEvaluator {
    fn default() -> Self {
        Self::new(EngineConfig::default().win_score)
    }
}

impl OutcomeEvaluator {
    #[must_use]
    pub const fn new(win_score: i32) -> Self {
        Self { win_score }
    }
}

impl Evaluator for OutcomeEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        if !board.is_terminal() {
            return i32::from(board.store(Side::North)) - i32::from(board.store(Side::South));
        }
        let mut swept = *board;
        swept.finalize();
        match swept.leader() {
            Some(Side::North) => self.win_score,
            Some(Side::South) => -self.win_score,
            None => 0,
        }
    }
}

/// Evaluator selected by `config.evaluator`.
#[must_use]
pub fn evaluator_from_config(config: &EngineConfig) -> Box<dyn Evaluator + Send + Sync> {
    match config.evaluator {
        EvaluatorKind::Material => Box::new(MaterialEvaluator::from_config(config)),
        EvaluatorKind::Outcome => Box::new(OutcomeEvaluator::new(config.win_score)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(slots: [u8; 14]) -> Board {
        Board::from_layout(slots).unwrap()
    }

    #[test]
    fn initial_position_is_level() {
        assert_eq!(MaterialEvaluator::default().evaluate(&Board::new()), 0);
        assert_eq!(OutcomeEvaluator::default().evaluate(&Board::new()), 0);
    }

    #[test]
    fn material_weights_stores_over_pits() {
        // North store +3, South pits +2.
        let board = layout([4, 4, 4, 4, 4, 6, 3, 4, 4, 4, 4, 4, 4, 0]);
        assert_eq!(MaterialEvaluator::default().evaluate(&board), 3 * 100 - 2 * 10);
        assert_eq!(MaterialEvaluator::new(1, 0).evaluate(&board), 3);
    }

    #[test]
    fn outcome_scores_finished_games() {
        let north_wins = layout([0, 0, 0, 0, 0, 0, 30, 0, 0, 0, 0, 0, 0, 18]);
        let south_wins = layout([0, 0, 0, 0, 0, 0, 18, 0, 0, 0, 0, 0, 0, 30]);
        let draw = layout([0, 0, 0, 0, 0, 0, 24, 0, 0, 0, 0, 0, 0, 24]);
        let eval = OutcomeEvaluator::default();

        assert_eq!(eval.evaluate(&north_wins), 1000);
        assert_eq!(eval.evaluate(&south_wins), -1000);
        assert_eq!(eval.evaluate(&draw), 0);
    }

    #[test]
    fn outcome_sweeps_unfinalized_terminal_boards() {
        // South's pits are empty; North's 10 remaining stones decide the game.
        let board = layout([0, 0, 0, 0, 0, 0, 15, 5, 5, 0, 0, 0, 0, 23]);
        assert_eq!(OutcomeEvaluator::default().evaluate(&board), 1000);
    }

    #[test]
    fn outcome_in_play_uses_store_difference() {
        let board = layout([4, 4, 4, 4, 4, 0, 5, 4, 4, 4, 4, 4, 0, 3]);
        assert_eq!(OutcomeEvaluator::default().evaluate(&board), 2);
    }

    #[test]
    fn config_picks_evaluator() {
        let board = layout([0, 0, 0, 0, 0, 0, 30, 0, 0, 0, 0, 0, 0, 18]);
        let material = evaluator_from_config(&EngineConfig::default());
        let outcome = evaluator_from_config(&EngineConfig {
            evaluator: EvaluatorKind::Outcome,
            win_score: 700,
            ..EngineConfig::default()
        });

        assert_eq!(material.evaluate(&board), 1200);
        assert_eq!(outcome.evaluate(&board), 700);
    }
}
