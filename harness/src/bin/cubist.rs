//! cubist: scramble and solve NxN cubes with heuristic-guided search.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cubist_harness::config::SolverConfig;
use cubist_harness::worker::{spawn_solver_service, SolveResponse};
use cubist_harness::worlds::cube::MoveSet;
use cubist_kernel::puzzle::moves::{format_sequence, parse_sequence};
use cubist_kernel::puzzle::scramble::scramble;
use cubist_search::replay_path;

/// cubist: heuristic-guided NxN cube solver.
#[derive(Parser)]
#[command(name = "cubist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a seeded random scramble.
    Scramble {
        /// Cube edge length.
        #[arg(long, default_value_t = 3)]
        size: usize,
        /// Number of quarter turns.
        #[arg(long, default_value_t = 20)]
        length: usize,
        /// RNG seed. Same seed, same scramble.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Restrict to U, R, F turns.
        #[arg(long)]
        fixed_corner: bool,
    },
    /// Solve the cube reached by applying a scramble to a solved cube.
    Solve {
        /// Path to a solver config JSON file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the configured cube size.
        #[arg(long)]
        size: Option<usize>,
        /// Scramble in face-turn notation, e.g. "R U R' U'".
        #[arg(long)]
        scramble: String,
        /// Override the configured expansion budget.
        #[arg(long)]
        max_expansions: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Scramble {
            size,
            length,
            seed,
            fixed_corner,
        } => {
            if !(2..=5).contains(&size) {
                bail!("size must be between 2 and 5, got {size}");
            }
            let move_set = if fixed_corner {
                MoveSet::FixedCorner
            } else {
                MoveSet::Full
            };
            println!("{}", format_sequence(&scramble(&move_set.turns(), length, seed)));
            Ok(())
        }
        Command::Solve {
            config,
            size,
            scramble,
            max_expansions,
        } => solve(config, size, &scramble, max_expansions).await,
    }
}

async fn solve(
    config_path: Option<PathBuf>,
    size: Option<usize>,
    scramble: &str,
    max_expansions: Option<u64>,
) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(size) = size {
        config.cube_size = size;
    }
    if max_expansions.is_some() {
        config.search.max_expansions = max_expansions;
    }
    config.validate()?;

    let turns = parse_sequence(scramble).context("parsing --scramble")?;
    let world = config.build_world()?;
    let start = world.scrambled(&turns)?;
    let provider = config.build_provider(&world);
    tracing::info!(
        size = config.cube_size,
        move_set = ?config.move_set,
        scramble_moves = turns.len(),
        state = %start.fingerprint().short(16),
        "solving"
    );

    let handle = spawn_solver_service(world.clone(), provider, config.search.clone());
    let mut session = handle.submit(start.clone()).await?;
    let cancel = session.cancel_token();

    let terminal = loop {
        tokio::select! {
            msg = session.next() => match msg {
                Some(SolveResponse::Progress { estimate }) => {
                    tracing::debug!(estimate, "progress");
                }
                Some(terminal) => break terminal,
                None => bail!("solver service stopped without an answer"),
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("interrupted, cancelling at the next round");
                cancel.cancel();
            }
        }
    };

    match terminal {
        SolveResponse::Solved { path } => {
            if !replay_path(&world, &start, &path).is_solved() {
                bail!("solver returned a path that does not solve the cube");
            }
            tracing::info!(moves = path.len(), "solved");
            println!("{}", format_sequence(&path));
            Ok(())
        }
        SolveResponse::NotFound => bail!("no solution found within the search budget"),
        SolveResponse::Cancelled => bail!("search cancelled"),
        SolveResponse::Error { kind, message } => bail!("solve failed ({kind:?}): {message}"),
        SolveResponse::Progress { .. } => bail!("solver ended on a progress message"),
    }
}
