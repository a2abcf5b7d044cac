use crate::engine::config::EngineConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{SearchLimit, SearchStats, Searcher};
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, RecvError, SendError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Input {
    ComputeMove(GameState, SearchLimit, EngineConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    MoveFound(usize, SearchStats),
    /// No pit was chosen: the game was already over, or the limit was
    /// `Depth(0)`, which only evaluates the position.
    NoMove,
}

/// Runs searches on a background thread, one request at a time.
///
/// The engine is created on the first request and reconfigured on later ones.
pub struct SearchWorker {
    requests: Option<Sender<Input>>,
    responses: Receiver<Output>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    #[must_use]
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Input>();
        let (response_tx, response_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut engine: Option<AlphaBetaEngine> = None;
            for msg in request_rx {
                let Input::ComputeMove(game_state, limit, config) = msg;
                let config = Arc::new(config);
                let engine = engine.get_or_insert_with(|| AlphaBetaEngine::new(Arc::clone(&config)));
                engine.update_config(config);

                let output = engine
                    .search(&game_state, limit)
                    .map_or(Output::NoMove, |(pit, stats)| Output::MoveFound(pit, stats));
                if response_tx.send(output).is_err() {
                    break;
                }
            }
            log::debug!("search worker stopped");
        });

        Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        }
    }

    /// Queues a search.
    ///
    /// # Errors
    /// Hands `input` back when the worker thread has stopped.
    pub fn request(&self, input: Input) -> Result<(), SendError<Input>> {
        let Some(tx) = &self.requests else {
            return Err(SendError(input));
        };
        tx.send(input)
    }

    /// Blocks until the next search finishes.
    ///
    /// # Errors
    /// When the worker thread has stopped.
    pub fn recv(&self) -> Result<Output, RecvError> {
        self.responses.recv()
    }

    /// Queues one search and waits for its answer.
    ///
    /// # Errors
    /// When the worker thread has stopped.
    pub fn compute(
        &self,
        game_state: GameState,
        limit: SearchLimit,
        config: EngineConfig,
    ) -> Result<Output, RecvError> {
        self.request(Input::ComputeMove(game_state, limit, config))
            .map_err(|_| RecvError)?;
        self.recv()
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.requests = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("search worker panicked");
            }
        }
    }
}
