use mancala_core::engine::config::EngineConfig;
use mancala_core::engine::eval::{MaterialEvaluator, OutcomeEvaluator};
use mancala_core::engine::search::{minimax, AlphaBetaEngine, INFINITY};
use mancala_core::engine::{Evaluator, SearchLimit, Searcher};
use mancala_core::logic::board::{Board, Side, SLOT_COUNT};
use mancala_core::logic::game::GameState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Scatters 48 stones over the board, keeping both rows non-empty.
fn random_board(rng: &mut StdRng) -> Board {
    loop {
        let mut slots = [0u8; SLOT_COUNT];
        for _ in 0..48 {
            slots[rng.gen_range(0..SLOT_COUNT)] += 1;
        }
        let board = Board::from_layout(slots).expect("48 stones always fit");
        if !board.is_terminal() {
            return board;
        }
    }
}

fn random_side(rng: &mut StdRng) -> Side {
    if rng.gen_bool(0.5) {
        Side::North
    } else {
        Side::South
    }
}

fn check_against_minimax(
    evaluator: impl Evaluator + Clone + Send + Sync + 'static,
    seed: u64,
    positions: usize,
) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..positions {
        let board = random_board(&mut rng);
        let side = random_side(&mut rng);
        for depth in 1..=4 {
            let mut engine = AlphaBetaEngine::with_evaluator(
                Arc::new(EngineConfig::default()),
                Box::new(evaluator.clone()),
            );
            let pruned = engine.alpha_beta(&board, depth, -INFINITY, INFINITY, side);

            let mut nodes = 0;
            let full = minimax(&board, depth, side, &evaluator, &mut nodes);

            assert_eq!(pruned, full, "{side} to move at depth {depth}\n{board}");
            assert!(engine.nodes_searched() <= nodes);
        }
    }
}

#[test]
fn alpha_beta_matches_minimax_with_material() {
    check_against_minimax(MaterialEvaluator::default(), 11, 40);
}

#[test]
fn alpha_beta_matches_minimax_with_outcome() {
    check_against_minimax(OutcomeEvaluator::default(), 29, 40);
}

#[test]
fn search_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..10 {
        let state = GameState::from_board(random_board(&mut rng), random_side(&mut rng));
        let config = Arc::new(EngineConfig::default());

        let mut first = AlphaBetaEngine::new(Arc::clone(&config));
        let mut second = AlphaBetaEngine::new(config);
        let a = first.search(&state, SearchLimit::Depth(5));
        let b = second.search(&state, SearchLimit::Depth(5));

        assert_eq!(a.map(|(pit, s)| (pit, s.score, s.nodes)), b.map(|(pit, s)| (pit, s.score, s.nodes)));
    }
}

#[test]
fn search_leaves_the_position_untouched() {
    let mut rng = StdRng::seed_from_u64(17);
    let state = GameState::from_board(random_board(&mut rng), Side::North);
    let before = state.board;

    let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));
    let (pit, _) = engine.search(&state, SearchLimit::Depth(6)).unwrap();

    assert_eq!(state.board, before);
    assert!(state.board.legal_moves(Side::North).contains(pit));
}

#[test]
fn deeper_timed_search_agrees_with_fixed_depth() {
    let state = GameState::new();
    let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));

    let (_, timed) = engine.search(&state, SearchLimit::Time(200)).unwrap();
    assert!(timed.depth >= 1);

    let mut fixed = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));
    let (_, stats) = fixed.search(&state, SearchLimit::Depth(timed.depth)).unwrap();
    assert_eq!(stats.score, timed.score);
}
