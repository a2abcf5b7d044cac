use crate::resources::AppConfig;
use crate::ui::{board, panels};
use crate::Limits;
use anyhow::{bail, Context, Result};
use mancala_core::arena::{self, EnginePlayer, MatchOptions, Player, RandomPlayer};
use mancala_core::engine::search::AlphaBetaEngine;
use mancala_core::engine::SearchLimit;
use mancala_core::logic::board::{Board, Side, SLOT_COUNT};
use mancala_core::logic::game::{GameResult, GameState};
use mancala_core::worker::{Output, SearchWorker};
use std::sync::Arc;

fn engine_player(name: &str, config: &AppConfig, limits: Limits, side: Side) -> EnginePlayer {
    let engine = AlphaBetaEngine::new(Arc::new(config.for_side(side).clone()));
    EnginePlayer::new(name, engine, limits.for_side(side))
}

pub fn run_selfplay(config: &AppConfig, limits: Limits, opening: u32, seed: u64) -> Result<()> {
    selfplay(config, limits, opening, seed, |text| println!("{text}"))?;
    Ok(())
}

// Plays the game, handing every rendered position to `emit` as it happens.
fn selfplay<F>(
    config: &AppConfig,
    limits: Limits,
    opening: u32,
    seed: u64,
    mut emit: F,
) -> Result<GameResult>
where
    F: FnMut(&str),
{
    let mut south = engine_player("south", config, limits, Side::South);
    let mut north = engine_player("north", config, limits, Side::North);
    let options = MatchOptions {
        opening_plies: opening,
        seed,
        ..MatchOptions::default()
    };

    emit(&board::render(&Board::new(), None));
    let report = arena::play_match(&mut south, &mut north, &options, |state| {
        let Some(record) = state.history.last() else {
            return;
        };
        emit(&panels::move_line(state.history.len(), record));
        emit(&board::render(&state.board, Some(record.pit)));
    })
    .context("self-play game aborted")?;

    emit(&panels::result_line(&report.result));
    Ok(report.result)
}

pub struct TournamentArgs {
    pub games: u32,
    pub limits: Limits,
    pub opening: u32,
    pub seed: u64,
    pub swap: bool,
    pub random_north: bool,
    pub json: bool,
}

pub fn run_tournament(config: &AppConfig, args: &TournamentArgs) -> Result<()> {
    let options = MatchOptions {
        opening_plies: args.opening,
        seed: args.seed,
        ..MatchOptions::default()
    };

    // "engine-a" carries the South settings and "engine-b" the North ones,
    // whichever seat they end up in.
    let stats = arena::run_tournament(
        args.games,
        |game| {
            let a: Box<dyn Player> = Box::new(engine_player("engine-a", config, args.limits, Side::South));
            let b: Box<dyn Player> = if args.random_north {
                Box::new(RandomPlayer::new(args.seed.wrapping_add(u64::from(game))))
            } else {
                Box::new(engine_player("engine-b", config, args.limits, Side::North))
            };
            if args.swap && game % 2 == 1 {
                (b, a)
            } else {
                (a, b)
            }
        },
        &options,
    )
    .context("tournament aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", panels::tournament_panel(&stats));
    }
    Ok(())
}

fn parse_layout(layout: Option<&[u8]>) -> Result<Board> {
    let Some(slots) = layout else {
        return Ok(Board::new());
    };
    let slots: [u8; SLOT_COUNT] = slots
        .try_into()
        .with_context(|| format!("layout needs {SLOT_COUNT} slots, got {}", slots.len()))?;
    Ok(Board::from_layout(slots)?)
}

pub fn run_analyze(
    config: &AppConfig,
    layout: Option<&[u8]>,
    side: Side,
    limit: SearchLimit,
) -> Result<()> {
    let state = GameState::from_board(parse_layout(layout)?, side);
    println!("{}", board::render(&state.board, None));
    println!("{}", panels::status_line(&state));

    let worker = SearchWorker::spawn();
    match worker.compute(state, limit, config.for_side(side).clone())? {
        Output::MoveFound(pit, stats) => println!("{}", panels::search_line(pit, &stats)),
        Output::NoMove => bail!("no move found: the game is over or the search depth is 0"),
    }
    Ok(())
}
