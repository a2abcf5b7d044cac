#[cfg(test)]
mod tests {
    use crate::engine::config::EngineConfig;
    use crate::engine::eval::MaterialEvaluator;
    use crate::engine::search::{minimax, AlphaBetaEngine, INFINITY};
    use crate::engine::{SearchLimit, Searcher};
    use crate::logic::board::{Board, Side};
    use crate::logic::game::GameState;
    use std::sync::Arc;

    #[test]
    fn bench_opening() {
        println!("--- Benchmarking Opening ---");
        let config = Arc::new(EngineConfig::default());
        let mut engine = AlphaBetaEngine::new(config);
        let game_state = GameState::new();

        // Warmup
        engine.search(&game_state, SearchLimit::Depth(2));

        let start = std::time::Instant::now();
        let result = engine.search(&game_state, SearchLimit::Depth(7));
        let duration = start.elapsed();

        if let Some((pit, stats)) = result {
            println!("Opening Depth 7 best pit {pit}, stats: {stats:?}");
            println!("Time taken: {duration:?}");
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let nps = (stats.nodes as f64 / duration.as_secs_f64().max(1e-9)) as u64;
            println!("NPS: {nps}");
        } else {
            panic!("Search returned None");
        }
    }

    #[test]
    fn bench_pruning_against_minimax() {
        println!("--- Pruning vs Minimax ---");
        let board = Board::new();
        let evaluator = MaterialEvaluator::default();

        for depth in 1..=6 {
            let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));
            let pruned = engine.alpha_beta(&board, depth, -INFINITY, INFINITY, Side::South);

            let mut full_nodes = 0;
            let full = minimax(&board, depth, Side::South, &evaluator, &mut full_nodes);

            println!(
                "depth {depth}: alpha-beta {} nodes, minimax {full_nodes} nodes",
                engine.nodes_searched()
            );
            assert_eq!(pruned, full);
            assert!(engine.nodes_searched() <= full_nodes);
        }
    }
}
