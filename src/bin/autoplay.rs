//! Headless autoplay
//!
//! Plays a run with the built-in chain hint, skipping turns when the board
//! has no chain, and prints the outcome.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lineup_engine::{NullSink, Run, RunConfig, RunStatus, SubmitOutcome};

/// Headless autoplay - plays a run with the chain hint
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Play a lineup run headlessly and report the outcome")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML run configuration (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum turns before giving up
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// Summary of a finished autoplay.
#[derive(Serialize)]
struct AutoplayResult {
    seed: u64,
    status: RunStatus,
    turns: u32,
    skipped: u32,
    score: u64,
    lives: u32,
    completed_categories: usize,
}

fn main() -> lineup_engine::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lineup_engine=info,autoplay=info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    let mut run = Run::new(config, seed, NullSink)?;
    let mut skipped = 0;

    while run.state().turn < args.max_turns && !run.status().is_terminal() {
        let Some(chain) = run.find_chain_hint() else {
            run.skip_turn()?;
            skipped += 1;
            continue;
        };

        run.pointer_down(chain[0])?;
        for &piece in &chain[1..] {
            run.pointer_enter(piece)?;
        }
        if let SubmitOutcome::Completed(outcome) = run.pointer_up()? {
            debug!(
                turn = run.state().turn,
                matches = outcome.matches,
                score = outcome.chain_score,
                "turn played"
            );
        }
    }

    let state = run.state();
    let result = AutoplayResult {
        seed,
        status: state.status,
        turns: state.turn,
        skipped,
        score: state.score,
        lives: state.lives,
        completed_categories: state.completed.values().filter(|&&done| done).count(),
    };
    info!(status = ?result.status, turns = result.turns, score = result.score, "autoplay finished");

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("failed to encode result: {}", err),
        }
    } else {
        println!(
            "seed {}: {:?} after {} turns ({} skipped), score {}, lives {}, {} categories complete",
            result.seed,
            result.status,
            result.turns,
            result.skipped,
            result.score,
            result.lives,
            result.completed_categories
        );
    }

    Ok(())
}
