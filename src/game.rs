//! A game session between two players, either of which may be the agent

use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use log::info;

use std::io::{stdout, Write};

use crate::{
    board::{Board, Player},
    solver::{BestMove, SearchResult, Solver},
    HEIGHT, WIDTH,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Player),
    Draw,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    state: GameState,
    /// Columns played so far, 1-indexed
    pub history: String,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::One,
            state: GameState::Playing,
            history: String::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Plays a 1-indexed column for the player to move
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(anyhow!("Invalid move, the game is over"));
        }
        if column_one_indexed < 1 || column_one_indexed > WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                WIDTH
            ));
        }
        let column = column_one_indexed - 1;
        if self.board.play(column, self.to_move).is_none() {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }
        self.history.push_str(&column_one_indexed.to_string());

        self.state = if self.board.is_win_for(self.to_move) {
            GameState::Won(self.to_move)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = self.to_move.opponent();

        Ok(self.state)
    }

    /// Lets `solver` choose and play a move for the player to move
    pub fn play_solver(&mut self, solver: &mut Solver) -> Result<SearchResult> {
        let mut board = self.board;
        let result = solver.best_move(&mut board, self.to_move);
        match result.best_move {
            BestMove::Column(column) => {
                info!("player {} plays column {}", self.to_move, column + 1);
                self.play_checked(column + 1)?;
            }
            // only reachable on a full board, which play_checked already marks as drawn
            BestMove::Draw => self.state = GameState::Draw,
        }
        Ok(result)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;

        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match self.board.get(row, column) {
                            Some(Player::One) => Color::Red,
                            Some(Player::Two) => Color::Yellow,
                            None => Color::DarkBlue,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
