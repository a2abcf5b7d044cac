use crate::engine::config::EngineConfig;
use crate::engine::eval::evaluator_from_config;
use crate::engine::{Evaluator, SearchLimit, SearchStats, Searcher};
use crate::logic::board::{Board, Side};
use crate::logic::game::GameState;
use crate::logic::rules::apply_move;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Window bound; no evaluation comes close.
pub const INFINITY: i32 = 1_000_000_000;

/// Value of a searched position and the pit that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub value: i32,
    /// `None` when the side to move had nothing to play or depth was exhausted.
    pub best_pit: Option<usize>,
}

impl SearchResult {
    const fn leaf(value: i32) -> Self {
        Self {
            value,
            best_pit: None,
        }
    }
}

/// Side to move and remaining depth after a move.
///
/// An extra turn keeps both: the same side moves again and the horizon does
/// not shrink.
#[must_use]
pub const fn next_ply(side: Side, depth: u8, extra_turn: bool) -> (Side, u8) {
    if extra_turn {
        (side, depth)
    } else {
        (side.opposite(), depth.saturating_sub(1))
    }
}

/// Plain minimax without pruning. North maximises, South minimises.
///
/// Same recursion and tie-breaking as [`AlphaBetaEngine::alpha_beta`]; used
/// to cross-check the pruned search. `nodes` counts visited positions.
pub fn minimax(
    board: &Board,
    depth: u8,
    side: Side,
    evaluator: &dyn Evaluator,
    nodes: &mut u64,
) -> SearchResult {
    *nodes += 1;
    if depth == 0 || board.is_terminal() {
        return SearchResult::leaf(evaluator.evaluate(board));
    }
    let moves = board.legal_moves(side);
    if moves.is_empty() {
        return SearchResult::leaf(evaluator.evaluate(board));
    }

    let maximizing = side == Side::North;
    let mut best = SearchResult {
        value: if maximizing { -INFINITY } else { INFINITY },
        best_pit: moves.first(),
    };
    for pit in &moves {
        let mut child = *board;
        let extra_turn = apply_move(&mut child, pit, side);
        let (next_side, next_depth) = next_ply(side, depth, extra_turn);
        let value = minimax(&child, next_depth, next_side, evaluator, nodes).value;

        let improves = if maximizing {
            value > best.value
        } else {
            value < best.value
        };
        if improves {
            best = SearchResult {
                value,
                best_pit: Some(pit),
            };
        }
    }
    best
}

pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: Box<dyn Evaluator + Send + Sync>,
    nodes_searched: u64,
    // Set when some leaf was cut by depth rather than by the end of the game.
    horizon_reached: bool,
    deadline: Option<Instant>,
}

impl AlphaBetaEngine {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let evaluator = evaluator_from_config(&config);
        Self::with_evaluator(config, evaluator)
    }

    /// Engine using a caller-supplied evaluator instead of `config.evaluator`.
    #[must_use]
    pub fn with_evaluator(
        config: Arc<EngineConfig>,
        evaluator: Box<dyn Evaluator + Send + Sync>,
    ) -> Self {
        Self {
            config,
            evaluator,
            nodes_searched: 0,
            horizon_reached: false,
            deadline: None,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = evaluator_from_config(&config);
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Positions visited since the last call to [`Searcher::search`].
    #[must_use]
    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Depth-limited alpha-beta search from `side`'s point of view.
    ///
    /// North maximises and South minimises the evaluation. Only strict
    /// improvements replace the incumbent, so among equal values the lowest pit
    /// wins. Every branch works on its own copy of the board.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: i32,
        beta: i32,
        side: Side,
    ) -> SearchResult {
        // Without deadline checks the node always completes.
        self.search_node(board, depth, alpha, beta, side, false)
            .unwrap_or_else(|| SearchResult::leaf(self.evaluator.evaluate(board)))
    }

    // Shared recursion. With `check_deadline` the node gives up between its
    // moves once the deadline passes (never before the first one); `None`
    // means it was abandoned. Children are never interrupted.
    fn search_node(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        side: Side,
        check_deadline: bool,
    ) -> Option<SearchResult> {
        self.nodes_searched += 1;

        if board.is_terminal() {
            return Some(SearchResult::leaf(self.evaluator.evaluate(board)));
        }
        if depth == 0 {
            self.horizon_reached = true;
            return Some(SearchResult::leaf(self.evaluator.evaluate(board)));
        }

        let moves = board.legal_moves(side);
        if moves.is_empty() {
            return Some(SearchResult::leaf(self.evaluator.evaluate(board)));
        }

        let maximizing = side == Side::North;
        let mut best = SearchResult {
            value: if maximizing { -INFINITY } else { INFINITY },
            best_pit: moves.first(),
        };

        for (searched, pit) in moves.iter().enumerate() {
            if check_deadline && searched > 0 && self.time_up() {
                return None;
            }

            let mut child = *board;
            let extra_turn = apply_move(&mut child, pit, side);
            let (next_side, next_depth) = next_ply(side, depth, extra_turn);
            let value = self
                .search_node(&child, next_depth, alpha, beta, next_side, false)?
                .value;

            if maximizing {
                if value > best.value {
                    best = SearchResult {
                        value,
                        best_pit: Some(pit),
                    };
                }
                alpha = alpha.max(best.value);
            } else {
                if value < best.value {
                    best = SearchResult {
                        value,
                        best_pit: Some(pit),
                    };
                }
                beta = beta.min(best.value);
            }

            if alpha >= beta {
                break;
            }
        }

        Some(best)
    }

    fn time_up(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    // Deepens one ply at a time until the deadline, the depth ceiling, or a
    // fully resolved tree. The first iteration always completes.
    fn iterative_deepening(&mut self, board: &Board, side: Side, budget: Duration) -> (SearchResult, u8) {
        self.deadline = Some(Instant::now() + budget);

        let mut best = SearchResult::leaf(self.evaluator.evaluate(board));
        let mut completed = 0;
        for depth in 1..=self.config.max_depth.max(1) {
            self.horizon_reached = false;
            let Some(result) = self.search_node(board, depth, -INFINITY, INFINITY, side, depth > 1) else {
                log::debug!("Depth {depth} abandoned at deadline");
                break;
            };
            best = result;
            completed = depth;

            if !self.horizon_reached {
                log::debug!("Game tree resolved at depth {depth}");
                break;
            }
            if self.time_up() {
                break;
            }
        }

        self.deadline = None;
        (best, completed)
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, game_state: &GameState, limit: SearchLimit) -> Option<(usize, SearchStats)> {
        if game_state.is_over() {
            return None;
        }

        let board = game_state.board;
        let side = game_state.turn;
        let start = Instant::now();
        self.nodes_searched = 0;
        self.horizon_reached = false;

        let (result, depth) = match limit {
            SearchLimit::Depth(depth) => {
                (self.alpha_beta(&board, depth, -INFINITY, INFINITY, side), depth)
            }
            SearchLimit::Time(ms) => self.iterative_deepening(&board, side, Duration::from_millis(ms)),
        };

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            score: result.value,
        };
        log::debug!(
            "{side} search: pit={:?} score={} depth={} nodes={} time={}ms",
            result.best_pit,
            stats.score,
            stats.depth,
            stats.nodes,
            stats.time_ms
        );

        result.best_pit.map(|pit| (pit, stats))
    }
}
