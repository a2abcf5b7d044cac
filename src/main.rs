//! Mancala: a Kalah engine driver.
//!
//! ## Usage
//!
//! - `mancala selfplay` - One engine-vs-engine game, board after every move
//! - `mancala tournament -n 20` - Many headless games and a summary
//! - `mancala analyze --layout 4,4,4,4,4,4,0,4,4,4,4,4,4,0 --side north` - Best pit for a position

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use mancala_core::engine::SearchLimit;
use mancala_core::logic::board::Side;

mod app;
mod resources;
mod ui;

use resources::AppConfig;

/// Kalah (6 pits, 4 stones) alpha-beta engine
#[derive(Parser)]
#[command(name = "mancala")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file with `south` and `north` engine configs
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one engine-vs-engine game and print every position
    Selfplay {
        #[command(flatten)]
        limits: Limits,
        /// Random plies before the engines take over
        #[arg(long, default_value_t = 0)]
        opening: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Play many headless games and report the totals
    Tournament {
        #[arg(short = 'n', long, default_value_t = 10)]
        games: u32,
        #[command(flatten)]
        limits: Limits,
        #[arg(long, default_value_t = 4)]
        opening: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Swap engines between sides every other game
        #[arg(long)]
        swap: bool,
        /// Replace the North engine with a random mover
        #[arg(long)]
        random_north: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search one position and print the best pit
    Analyze {
        /// 14 comma-separated slot counts; defaults to the opening position
        #[arg(long, value_delimiter = ',', num_args = 14)]
        layout: Option<Vec<u8>>,
        #[arg(long, value_enum, default_value_t = SideArg::South)]
        side: SideArg,
        #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..))]
        depth: u8,
        /// Iterative deepening budget in milliseconds; overrides --depth
        #[arg(long)]
        time: Option<u64>,
    },
}

/// Per-side search limits. A time budget wins over a depth.
#[derive(Args, Debug, Clone, Copy)]
pub struct Limits {
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..))]
    pub south_depth: u8,
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..))]
    pub north_depth: u8,
    /// Milliseconds per South move
    #[arg(long)]
    pub south_time: Option<u64>,
    /// Milliseconds per North move
    #[arg(long)]
    pub north_time: Option<u64>,
}

impl Limits {
    #[must_use]
    pub fn for_side(self, side: Side) -> SearchLimit {
        let (depth, time) = match side {
            Side::South => (self.south_depth, self.south_time),
            Side::North => (self.north_depth, self.north_time),
        };
        time.map_or(SearchLimit::Depth(depth), SearchLimit::Time)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideArg {
    South,
    North,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::South => Self::South,
            SideArg::North => Self::North,
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Selfplay {
            limits,
            opening,
            seed,
        } => app::run_selfplay(&config, limits, opening, seed),
        Commands::Tournament {
            games,
            limits,
            opening,
            seed,
            swap,
            random_north,
            json,
        } => app::run_tournament(
            &config,
            &app::TournamentArgs {
                games,
                limits,
                opening,
                seed,
                swap,
                random_north,
                json,
            },
        ),
        Commands::Analyze {
            layout,
            side,
            depth,
            time,
        } => {
            let limit = time.map_or(SearchLimit::Depth(depth), SearchLimit::Time);
            app::run_analyze(&config, layout.as_deref(), side.into(), limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_depth_is_rejected() {
        assert!(Cli::try_parse_from(["mancala", "analyze", "--depth", "0"]).is_err());
        assert!(Cli::try_parse_from(["mancala", "selfplay", "--south-depth", "0"]).is_err());
        assert!(Cli::try_parse_from(["mancala", "analyze", "--depth", "1"]).is_ok());
    }

    #[test]
    fn time_budget_overrides_depth() {
        let cli = Cli::try_parse_from(["mancala", "selfplay", "--north-time", "50", "--south-depth", "3"]).unwrap();
        let Commands::Selfplay { limits, .. } = cli.command else {
            panic!("expected selfplay");
        };
        assert_eq!(limits.for_side(Side::South), SearchLimit::Depth(3));
        assert_eq!(limits.for_side(Side::North), SearchLimit::Time(50));
    }
}
