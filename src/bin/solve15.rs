//! Command-line front-end for the 15-puzzle solver: reads a board, validates
//! and solves it, and prints the resulting move sequence.

use std::fmt;
use std::fs;
use std::io::{self, Read as _};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use puzzle15::board::Board;
use puzzle15::r#move::Direction;
use puzzle15::solver::{SearchError, SearchIterationStats, Solver};

/// Solve a 4x4 sliding-tile puzzle optimally using IDA* with a Walking
/// Distance + Inversion Distance heuristic.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to a file holding the start configuration (16 whitespace-separated
    /// integers, 0..15, row-major, 0 for the blank). Reads stdin if omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print each move as the tile value slid instead of the blank's
    /// direction of motion.
    #[arg(short, long)]
    tiles: bool,

    /// Echo the parsed board before solving.
    #[arg(short, long)]
    verbose: bool,
}

/// Move representation chosen for this CLI: either the direction the blank
/// moves, or the tile value that slides into its place.
enum Move {
    Direction(Direction),
    Tile(u8),
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direction(d) => write!(f, "{d}"),
            Self::Tile(t) => write!(f, "{t}"),
        }
    }
}

fn read_input(args: &Args) -> io::Result<String> {
    match &args.input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match read_input(&args) {
        Ok(text) => text,
        Err(err) => {
            log::error!("failed to read input: {err}");
            return ExitCode::FAILURE;
        }
    };

    let board: Board = match text.parse() {
        Ok(board) => board,
        Err(err) => {
            log::error!("invalid board: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        log::info!("parsed board:\n{board}");
        log::info!(
            "output format: {}",
            if args.tiles { "tile values" } else { "blank directions" }
        );
    }

    log::debug!("building Walking Distance and Inversion Distance tables");
    let solver = Solver::new();

    let callback = |stats: SearchIterationStats| {
        log::debug!(
            "iteration exhausted: depth_limit={} nodes_expanded={}",
            stats.depth_limit,
            stats.nodes_expanded
        );
    };

    let solution = match solver.solve_with_callback(&board, &callback) {
        Ok(solution) => solution,
        Err(SearchError::Unsolvable) => {
            log::error!("board is not solvable");
            return ExitCode::FAILURE;
        }
        Err(SearchError::DepthLimitExceeded(limit)) => {
            log::error!("search exceeded the depth cap of {limit} moves");
            return ExitCode::FAILURE;
        }
    };

    log::info!("solution length: {}", solution.len());

    let mut board = board;
    let moves: Vec<Move> = solution
        .into_iter()
        .map(|direction| {
            if args.tiles {
                let cur = board.blank_position();
                let child = child_position(cur, direction);
                let tile = board.cell(child);
                board.swap(cur, child);
                Move::Tile(tile)
            } else {
                Move::Direction(direction)
            }
        })
        .collect();

    let rendered: String = moves.iter().map(ToString::to_string).collect();
    println!("{rendered}");

    ExitCode::SUCCESS
}

/// Recomputes the blank's destination position for a move, used only to
/// translate the solution into tile-slid notation for display. The
/// solution returned by the solver is always a sequence of legal moves, so
/// no bounds checking is needed here.
fn child_position(cur: usize, direction: Direction) -> usize {
    match direction {
        Direction::Up => cur - puzzle15::board::WIDTH,
        Direction::Down => cur + puzzle15::board::WIDTH,
        Direction::Left => cur - 1,
        Direction::Right => cur + 1,
    }
}
