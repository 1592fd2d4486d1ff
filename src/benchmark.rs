//! Timing of the search under every combination of its switches

use anyhow::{Context, Result};
use indicatif::*;
use log::info;

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::*;

use crate::{
    board::{Board, Player},
    config::SearchConfig,
    solver::{BestMove, SearchResult, Solver},
};

/// Search depth used when benchmarking, lower than for play so that the
/// configurations without pruning finish in reasonable time
pub const BENCHMARK_DEPTH: usize = 5;
pub const CSV_HEADER: &str = "alpha_beta,mid_col,early_win,runtime_ms,nodes,config";

/// One timed search
#[derive(Clone, Debug)]
pub struct BenchmarkRow {
    pub config: SearchConfig,
    pub elapsed: Duration,
    pub result: SearchResult,
}

/// Reads a board file in the format parsed by [`Board`]'s `FromStr` impl
pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Board> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Error opening file: {}", path.display()))?;
    text.parse::<Board>()
        .with_context(|| format!("Error reading board from {}", path.display()))
}

/// Searches `board` for `player` once with each of the eight configurations
pub fn run(board: &Board, player: Player, depth: usize, show_progress: bool) -> Vec<BenchmarkRow> {
    let configs = SearchConfig::all_combinations(depth);

    let progress = if show_progress {
        ProgressBar::new(configs.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Benchmarking: {bar:40.cyan/blue} {pos}/{len} config {msg}")
            .progress_chars("█▓▒░  "),
    );

    let mut rows = Vec::with_capacity(configs.len());
    for config in configs {
        progress.set_message(&config.to_string());

        // every configuration starts from the same position
        let mut board = *board;
        let mut solver = Solver::new(config);
        let start = Instant::now();
        let result = solver.best_move(&mut board, player);
        let elapsed = start.elapsed();

        info!(
            "config {}: {:?} in {:.3}ms, {} nodes",
            config,
            result.best_move,
            elapsed.as_secs_f64() * 1000.0,
            result.node_count
        );
        rows.push(BenchmarkRow {
            config,
            elapsed,
            result,
        });
        progress.inc(1);
    }
    progress.finish();

    rows
}

/// Writes one line per row, then the move chosen by the last row
pub fn write_csv<W: Write>(rows: &[BenchmarkRow], mut out: W) -> Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for row in rows {
        let config = row.config;
        writeln!(
            out,
            "{},{},{},{},{},\"{}\"",
            config.alpha_beta as u8,
            config.move_order as u8,
            config.early_win as u8,
            row.elapsed.as_millis(),
            row.result.node_count,
            config
        )?;
    }
    if let Some(last) = rows.last() {
        let column = match last.result.best_move {
            BestMove::Column(column) => column as i64,
            BestMove::Draw => -1,
        };
        writeln!(out, "Best Col:{} With Score/Win:{}", column, last.result.score)?;
    }
    out.flush()?;
    Ok(())
}
