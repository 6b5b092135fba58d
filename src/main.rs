//! Match-3 autoplay runner (default binary).
//!
//! Generates a seeded board and plays hinted moves headlessly, printing a
//! summary. Set `RUST_LOG=debug` to watch every swap, cascade step and cue.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use match3::core::SessionConfig;
use match3::sim::{self, SimConfig, SimReport};
use match3::types::{DEFAULT_COLS, DEFAULT_ROWS, TILE_TYPE_COUNT};

/// Headless match-3 simulator
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Board height in cells
    #[arg(long, env = "MATCH3_ROWS", default_value_t = DEFAULT_ROWS)]
    rows: usize,
    /// Board width in cells
    #[arg(long, env = "MATCH3_COLS", default_value_t = DEFAULT_COLS)]
    cols: usize,
    /// Number of distinct tile types in play
    #[arg(
        long = "types",
        env = "MATCH3_TYPES",
        default_value_t = TILE_TYPE_COUNT,
        value_parser = clap::value_parser!(u8).range(3..=6)
    )]
    tile_types: u8,
    /// Seed for board generation and refills
    #[arg(long, env = "MATCH3_SEED", default_value_t = 1)]
    seed: u32,
    /// Maximum number of swaps to play
    #[arg(long, env = "MATCH3_MOVES", default_value_t = 50)]
    moves: u32,
    /// Print the summary as JSON
    #[arg(long, env = "MATCH3_JSON")]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = SimConfig {
        session: SessionConfig::new(args.rows, args.cols, args.tile_types, args.seed),
        moves: args.moves,
    };

    let report = sim::run(&config)?;
    if args.json {
        let out = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{}", out);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SimReport) {
    println!(
        "{}x{} board, {} tile types, seed {}",
        report.rows, report.cols, report.tile_types, report.seed
    );
    println!("moves:         {}", report.moves_played);
    println!("score:         {}", report.score);
    println!("steps:         {}", report.steps);
    println!("longest chain: {}", report.longest_chain);
    println!("reshuffles:    {}", report.reshuffles);
    if report.stuck {
        println!("stopped early: no legal move left");
    }
    println!();
    for line in &report.board {
        println!("{}", line);
    }
}
