use mancala_core::arena::TournamentStats;
use mancala_core::engine::SearchStats;
use mancala_core::logic::game::{GameResult, GameState, GameStatus, MoveRecord};
use std::fmt::Write;

#[must_use]
pub fn status_line(state: &GameState) -> String {
    match state.status {
        GameStatus::Playing => format!("{} to move", state.turn),
        GameStatus::Finished(result) => result_line(&result),
    }
}

#[must_use]
pub fn result_line(result: &GameResult) -> String {
    let score = format!("South {} - {} North", result.south_store, result.north_store);
    match result.winner {
        Some(side) => format!("{score}: {side} wins by {}", result.margin()),
        None => format!("{score}: draw"),
    }
}

/// One history entry, numbered from 1.
#[must_use]
pub fn move_line(number: usize, record: &MoveRecord) -> String {
    let mut line = format!(
        "{number:>3}. {} sows pit {} ({} stones)",
        record.side, record.pit, record.stones_sown
    );
    if record.captured > 0 {
        let _ = write!(line, ", captures {}", record.captured);
    }
    if record.extra_turn {
        line.push_str(", extra turn");
    }
    if let Some(note) = &record.note {
        let _ = write!(line, "  [{note}]");
    }
    line
}

#[must_use]
pub fn search_line(pit: usize, stats: &SearchStats) -> String {
    format!(
        "best pit {pit}  score {}  depth {}  nodes {}  {} ms",
        stats.score, stats.depth, stats.nodes, stats.time_ms
    )
}

#[must_use]
pub fn tournament_panel(stats: &TournamentStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Games:       {}", stats.games);
    let _ = writeln!(out, "South wins:  {}", stats.south_wins);
    let _ = writeln!(out, "North wins:  {}", stats.north_wins);
    let _ = writeln!(out, "Draws:       {}", stats.draws);
    let _ = writeln!(out, "Avg margin:  {:.2}", stats.average_margin());
    for (player, wins) in &stats.player_wins {
        let _ = writeln!(out, "  {player}: {wins} wins");
    }
    out
}
