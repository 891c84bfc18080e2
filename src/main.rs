//! Gomoku engine command line
//!
//! - `gomoku` / `gomoku play` - Serve the text protocol on stdin/stdout
//! - `gomoku selfplay` - Let the engine play a full game against itself
//! - `gomoku bench` - Time alpha-beta against plain minimax on fixed positions

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use gomoku::protocol::Session;
use gomoku::rules::has_five_at_pos;
use gomoku::search::Searcher;
use gomoku::{AIEngine, Board, EngineConfig, Pos, Stone};

/// Gomoku: five in a row on a 19x19 board
#[derive(Parser)]
#[command(name = "gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search depth in plies
    #[arg(long, global = true, default_value_t = 3)]
    depth: i8,

    /// Per-move time limit in milliseconds (unlimited if omitted)
    #[arg(long, global = true)]
    time_ms: Option<u64>,

    /// Color the engine plays
    #[arg(long, global = true, value_enum, default_value_t = Color::White)]
    engine_color: Color,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the line-based text protocol on stdin/stdout
    Play,
    /// Play the engine against itself and print the final board
    Selfplay {
        /// Stop after this many moves
        #[arg(long, default_value_t = 361)]
        max_moves: usize,
    },
    /// Compare pruned and unpruned search on fixed positions
    Bench,
}

#[derive(Clone, Copy, ValueEnum)]
enum Color {
    Black,
    White,
}

impl From<Color> for Stone {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    anyhow::ensure!(cli.depth >= 1, "--depth must be at least 1");
    let config = EngineConfig {
        max_depth: cli.depth,
        time_limit: cli.time_ms.map(Duration::from_millis),
        color: cli.engine_color.into(),
    };

    match cli.command {
        Some(Commands::Play) | None => {
            let mut session = Session::new(config);
            session.run(io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Selfplay { max_moves }) => run_selfplay(config, max_moves),
        Some(Commands::Bench) => {
            run_bench(config.max_depth);
            Ok(())
        }
    }
}

fn run_selfplay(config: EngineConfig, max_moves: usize) -> Result<()> {
    let mut engines = [
        AIEngine::with_config(EngineConfig {
            color: Stone::Black,
            ..config
        }),
        AIEngine::with_config(EngineConfig {
            color: Stone::White,
            ..config
        }),
    ];

    let start = Instant::now();
    let mut side = 0;
    let mut last = engines[side].open().context("opening move")?;
    println!("1. {:?} {last}", engines[side].color());

    for ply in 2..=max_moves {
        let board = engines[side].board();
        if has_five_at_pos(board, last, engines[side].color()) {
            info!("{:?} wins after {} moves", engines[side].color(), ply - 1);
            break;
        }
        if board.is_full() {
            info!("draw");
            break;
        }

        side ^= 1;
        last = engines[side]
            .take_turn(i32::from(last.row), i32::from(last.col))
            .with_context(|| format!("move {ply}"))?;
        println!("{ply}. {:?} {last}", engines[side].color());
    }

    println!("\n{}", engines[side].board());
    info!("game took {:.2?}", start.elapsed());
    Ok(())
}

/// Fixed positions: an opening, a midgame cluster and a tactical line
fn bench_positions() -> Vec<(&'static str, Board)> {
    let layouts: [(&str, &[(u8, u8, Stone)]); 3] = [
        ("opening", &[(9, 9, Stone::Black), (9, 10, Stone::White)]),
        (
            "midgame",
            &[
                (9, 9, Stone::Black),
                (9, 10, Stone::White),
                (10, 10, Stone::Black),
                (8, 8, Stone::White),
                (10, 9, Stone::Black),
                (11, 9, Stone::White),
            ],
        ),
        (
            "tactical",
            &[
                (7, 7, Stone::Black),
                (8, 8, Stone::Black),
                (9, 9, Stone::Black),
                (6, 6, Stone::White),
                (9, 10, Stone::White),
                (9, 11, Stone::White),
            ],
        ),
    ];

    layouts
        .iter()
        .map(|&(name, stones)| {
            let mut board = Board::new();
            for &(row, col, stone) in stones {
                board.place_stone(Pos::new(row, col), stone);
            }
            (name, board)
        })
        .collect()
}

fn run_bench(depth: i8) {
    println!("{:<10} {:>10} {:>12} {:>10} {:>12}", "position", "ab nodes", "ab time", "mm nodes", "mm time");
    let mut searcher = Searcher::new();

    for (name, board) in bench_positions() {
        let start = Instant::now();
        let pruned = searcher.search(&board, Stone::White, depth);
        let pruned_time = start.elapsed();

        let start = Instant::now();
        let full = searcher.minimax(&board, Stone::White, depth);
        let full_time = start.elapsed();

        if pruned.best_move != full.best_move || pruned.score != full.score {
            warn!("{name}: alpha-beta and minimax disagree");
        }
        println!(
            "{:<10} {:>10} {:>12.2?} {:>10} {:>12.2?}",
            name, pruned.nodes, pruned_time, full.nodes, full_time
        );
    }
}
