use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;

use std::fs::File;
use std::io::{stdin, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use connect4_minimax::{
    benchmark::{self, BENCHMARK_DEPTH},
    board::Player,
    config::{SearchConfig, DEFAULT_DEPTH},
    game::{Game, GameState},
    solver::{Outcome, Solver},
    WIDTH,
};

#[derive(Parser)]
#[command(version, about = "Play Connect 4 against a depth-limited minimax agent")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game in the terminal (the default)
    Play(PlayArgs),
    /// Time the search under every combination of switches on a board file
    Bench(BenchArgs),
}

#[derive(Args)]
struct Switches {
    /// Disable alpha-beta pruning
    #[arg(long)]
    no_alpha_beta: bool,
    /// Visit columns left to right instead of from the middle out
    #[arg(long)]
    no_move_order: bool,
    /// Disable the immediate-win shortcut
    #[arg(long)]
    no_early_win: bool,
}

#[derive(Args)]
struct PlayArgs {
    #[command(flatten)]
    switches: Switches,
    /// Number of plies the agent looks ahead
    #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = parse_depth)]
    depth: usize,
    /// Let the agent make the first move
    #[arg(long)]
    ai_first: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            switches: Switches {
                no_alpha_beta: false,
                no_move_order: false,
                no_early_win: false,
            },
            depth: DEFAULT_DEPTH,
            ai_first: false,
        }
    }
}

#[derive(Args)]
struct BenchArgs {
    /// Whitespace separated grid of 0 (empty), 1 and 2, top row first
    board_file: PathBuf,
    #[arg(long, default_value_t = BENCHMARK_DEPTH, value_parser = parse_depth)]
    depth: usize,
    /// Player the search is run for
    #[arg(long, default_value = "2", value_parser = parse_player)]
    player: Player,
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,
}

fn parse_depth(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(depth) if depth >= 1 => Ok(depth),
        _ => Err(format!("'{}' is not a depth of at least 1", s)),
    }
}

fn parse_player(s: &str) -> Result<Player, String> {
    s.parse::<u8>()
        .ok()
        .and_then(Player::from_code)
        .ok_or_else(|| format!("'{}' is not a player, use 1 or 2", s))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command.unwrap_or_else(|| Command::Play(PlayArgs::default())) {
        Command::Play(args) => play(args),
        Command::Bench(args) => bench(args),
    }
}

fn bench(args: BenchArgs) -> Result<()> {
    let board = benchmark::load_board(&args.board_file)?;
    info!("loaded board from {}:\n{}", args.board_file.display(), board);

    let rows = benchmark::run(&board, args.player, args.depth, true);
    let out = BufWriter::new(File::create(&args.output)?);
    benchmark::write_csv(&rows, out)?;

    println!("Benchmark written to {}", args.output.display());
    Ok(())
}

fn play(args: PlayArgs) -> Result<()> {
    let config = SearchConfig::new(
        !args.switches.no_alpha_beta,
        !args.switches.no_move_order,
        !args.switches.no_early_win,
        args.depth,
    );
    info!("search config {} at depth {}", config, config.depth);

    let mut solver = Solver::new(config);
    let mut game = Game::new();
    let ai = if args.ai_first { Player::One } else { Player::Two };

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // game loop
    loop {
        game.display()?;

        match game.state() {
            GameState::Playing => {
                if game.to_move() == ai {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    let start = Instant::now();
                    let result = game.play_solver(&mut solver)?;
                    println!("Search runtime: {} ms", start.elapsed().as_millis());

                    match solver.outcome(result.score) {
                        Outcome::Win(plies) => println!("AI can force a win within {} plies.", plies),
                        Outcome::Loss(plies) => println!("You can force a win within {} plies.", plies),
                        Outcome::Estimate(_) => {}
                    }
                    if let Some(column) = result.best_move.column() {
                        println!("AI moves to column {}", column + 1);
                    }
                    continue;
                }

                // human player
                print!("Move input (1-{}) > ", WIDTH);
                stdout().flush()?;
                let mut input_str = String::new();
                if stdin.read_line(&mut input_str)? == 0 {
                    // end of input
                    return Ok(());
                }

                let column = match input_str.trim().parse::<usize>() {
                    Err(_) => {
                        println!("Invalid number: {}", input_str.trim());
                        continue;
                    }
                    Ok(column) => column,
                };
                if let Err(err) = game.play_checked(column) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(player) => {
                if player == ai {
                    println!("AI wins!");
                } else {
                    println!("You win!");
                }
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    info!("game record: {}", game.history);
    Ok(())
}
