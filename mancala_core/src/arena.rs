//! Headless match driver.
//!
//! Alternates two [`Player`]s over a [`GameState`] until the game ends and
//! tallies results over many games. The same side keeps moving after an extra
//! turn; a side with nothing to sow ends the game.

use crate::engine::search::AlphaBetaEngine;
use crate::engine::{SearchLimit, SearchStats, Searcher};
use crate::logic::board::Side;
use crate::logic::game::{GameResult, GameState};
use crate::logic::rules::MoveError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub trait Player {
    fn name(&self) -> &str;

    /// Pit to sow for `state.turn`, or `None` to pass.
    fn choose_pit(&mut self, state: &GameState) -> Option<usize>;

    /// Detail about the last choice, stored as the move's note.
    fn last_note(&self) -> Option<String> {
        None
    }
}

/// Alpha-beta engine playing under a fixed search limit.
pub struct EnginePlayer {
    name: String,
    engine: AlphaBetaEngine,
    limit: SearchLimit,
    last_stats: Option<SearchStats>,
}

impl EnginePlayer {
    #[must_use]
    pub fn new(name: impl Into<String>, engine: AlphaBetaEngine, limit: SearchLimit) -> Self {
        Self {
            name: name.into(),
            engine,
            limit,
            last_stats: None,
        }
    }
}

impl Player for EnginePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_pit(&mut self, state: &GameState) -> Option<usize> {
        let (pit, stats) = self.engine.search(state, self.limit)?;
        self.last_stats = Some(stats);
        Some(pit)
    }

    fn last_note(&self) -> Option<String> {
        self.last_stats.map(|s| {
            format!(
                "depth {} score {} nodes {} {}ms",
                s.depth, s.score, s.nodes, s.time_ms
            )
        })
    }
}

/// Uniformly random legal moves from a seeded generator.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_pit(&mut self, state: &GameState) -> Option<usize> {
        state
            .board
            .legal_moves(state.turn)
            .as_slice()
            .choose(&mut self.rng)
            .copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Random plies played before the players take over.
    pub opening_plies: u32,
    /// Seed for the opening plies.
    pub seed: u64,
    pub max_plies: u32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            opening_plies: 0,
            seed: 0,
            max_plies: 1000,
        }
    }
}

#[derive(Debug)]
pub enum ArenaError {
    NoMove { side: Side, player: String },
    IllegalMove { player: String, pit: usize, source: MoveError },
    PlyLimit(u32),
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMove { side, player } => {
                write!(f, "{player} passed as {side} while holding legal moves")
            }
            Self::IllegalMove { player, pit, source } => {
                write!(f, "{player} chose pit {pit}: {source}")
            }
            Self::PlyLimit(plies) => write!(f, "game still running after {plies} plies"),
        }
    }
}

impl std::error::Error for ArenaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IllegalMove { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchReport {
    pub result: GameResult,
    pub plies: u32,
    pub state: GameState,
}

/// Plays one game from the standard opening.
///
/// `on_move` sees the state after every ply; the ply itself is the last
/// history entry.
///
/// # Errors
/// A player passing with moves available or choosing an illegal pit, or
/// the game outlasting `options.max_plies`.
pub fn play_match<F>(
    south: &mut dyn Player,
    north: &mut dyn Player,
    options: &MatchOptions,
    mut on_move: F,
) -> Result<MatchReport, ArenaError>
where
    F: FnMut(&GameState),
{
    let mut state = GameState::new();
    let mut opening = RandomPlayer::new(options.seed);
    let mut plies = 0;

    loop {
        if let Some(result) = state.result() {
            return Ok(MatchReport {
                result,
                plies,
                state,
            });
        }
        if plies >= options.max_plies {
            return Err(ArenaError::PlyLimit(plies));
        }

        let side = state.turn;
        let player: &mut dyn Player = if plies < options.opening_plies {
            &mut opening
        } else {
            match side {
                Side::South => &mut *south,
                Side::North => &mut *north,
            }
        };

        let Some(pit) = player.choose_pit(&state) else {
            if state.pass() {
                continue;
            }
            return Err(ArenaError::NoMove {
                side,
                player: player.name().to_string(),
            });
        };

        state
            .make_move_with_steps(pit, |slot| log::trace!("{side} sows into slot {slot}"))
            .map_err(|source| ArenaError::IllegalMove {
                player: player.name().to_string(),
                pit,
                source,
            })?;
        if let Some(note) = player.last_note() {
            state.annotate_last(note);
        }
        plies += 1;
        on_move(&state);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentStats {
    pub games: u32,
    pub south_wins: u32,
    pub north_wins: u32,
    pub draws: u32,
    pub total_margin: u32,
    /// Wins keyed by player name.
    pub player_wins: BTreeMap<String, u32>,
}

impl TournamentStats {
    pub fn record(&mut self, result: &GameResult, south: &str, north: &str) {
        self.games += 1;
        self.total_margin += u32::from(result.margin());
        let winner = match result.winner {
            Some(Side::South) => {
                self.south_wins += 1;
                south
            }
            Some(Side::North) => {
                self.north_wins += 1;
                north
            }
            None => {
                self.draws += 1;
                return;
            }
        };
        *self.player_wins.entry(winner.to_string()).or_default() += 1;
    }

    #[must_use]
    pub fn average_margin(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.total_margin) / f64::from(self.games)
        }
    }
}

/// Plays `games` games, asking `make_players(game_index)` for a fresh
/// `(south, north)` pair each time. Game `i` uses seed `options.seed + i`.
///
/// # Errors
/// The first game that fails, as in [`play_match`].
pub fn run_tournament<F>(
    games: u32,
    mut make_players: F,
    options: &MatchOptions,
) -> Result<TournamentStats, ArenaError>
where
    F: FnMut(u32) -> (Box<dyn Player>, Box<dyn Player>),
{
    let mut stats = TournamentStats::default();
    for game in 0..games {
        let (mut south, mut north) = make_players(game);
        let game_options = MatchOptions {
            seed: options.seed.wrapping_add(u64::from(game)),
            ..*options
        };
        let report = play_match(south.as_mut(), north.as_mut(), &game_options, |_| {})?;
        stats.record(&report.result, south.name(), north.name());
        log::info!(
            "Game {}/{games}: {} (South) {} - {} {} (North) in {} plies",
            game + 1,
            south.name(),
            report.result.south_store,
            report.result.north_store,
            north.name(),
            report.plies
        );
    }
    Ok(stats)
}
