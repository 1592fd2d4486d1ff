use anyhow::{anyhow, Result};

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::{CONNECT, HEIGHT, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The digit used for this player's tiles in board files
    pub fn code(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single tile, `None` when empty
pub type Cell = Option<Player>;

/// The four directions a line of tiles can run in, as (row step, column step).
/// Row 0 is the top of the board, so `Down` increases the row.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Right,
    Down,
    DownRight,
    UpRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::DownRight,
        Direction::UpRight,
    ];

    pub const fn step(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::UpRight => (-1, 1),
        }
    }
}

/// A Connect 4 grid with gravity: a tile is only ever placed on top of
/// another tile or on the bottom row
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Board {
    // cells are stored top-to-bottom, left-to-right
    cells: [[Cell; WIDTH]; HEIGHT],
    // number of tiles in each column
    heights: [usize; WIDTH],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; WIDTH]; HEIGHT],
            heights: [0; WIDTH],
        }
    }

    /// Builds a board from a string of 1-indexed columns, alternating
    /// players starting with `Player::One`
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    let column = column - 1;
                    // abort if the position is won at any point
                    if board.is_win_for(player.opponent()) {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    if board.play(column, player).is_none() {
                        return Err(anyhow!("Invalid move, column {} full", column + 1));
                    }
                    player = player.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// The number of tiles in a column
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn num_moves(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Whether a tile can be dropped into `column`
    pub fn is_legal(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_none()
    }

    /// Drops a tile for `player` into `column`, returning the row it landed on.
    /// Illegal columns leave the board untouched and return `None`.
    pub fn play(&mut self, column: usize, player: Player) -> Option<usize> {
        if !self.is_legal(column) {
            return None;
        }
        let row = HEIGHT - 1 - self.heights[column];
        self.cells[row][column] = Some(player);
        self.heights[column] += 1;
        Some(row)
    }

    /// Removes the tile at `row` of `column` placed by [`Board::play`].
    /// Out of range coordinates are ignored.
    pub fn undo(&mut self, column: usize, row: usize) {
        if column >= WIDTH || row >= HEIGHT || self.cells[row][column].is_none() {
            return;
        }
        self.cells[row][column] = None;
        self.heights[column] = HEIGHT - 1 - row;
    }

    /// Plays a move that is taken back when the returned guard is dropped
    pub fn trial(&mut self, column: usize, player: Player) -> Option<TrialMove<'_>> {
        let row = self.play(column, player)?;
        Some(TrialMove {
            board: self,
            column,
            row,
        })
    }

    /// Whether dropping a tile for `player` into `column` completes a line.
    /// The board is left unchanged.
    pub fn is_winning_move(&mut self, column: usize, player: Player) -> bool {
        match self.trial(column, player) {
            Some(trial) => trial.is_win_for(player),
            None => false,
        }
    }

    pub fn has_any_legal_move(&self) -> bool {
        (0..WIDTH).any(|column| self.is_legal(column))
    }

    pub fn is_full(&self) -> bool {
        !self.has_any_legal_move()
    }

    /// The cells of the line of length `CONNECT` starting at (`row`, `column`)
    /// and running in `direction`, or `None` if it leaves the board
    pub fn window(&self, row: usize, column: usize, direction: Direction) -> Option<[Cell; CONNECT]> {
        let (row_step, column_step) = direction.step();
        let mut window = [None; CONNECT];
        for (k, cell) in window.iter_mut().enumerate() {
            let r = row as isize + k as isize * row_step;
            let c = column as isize + k as isize * column_step;
            if r < 0 || r >= HEIGHT as isize || c < 0 || c >= WIDTH as isize {
                return None;
            }
            *cell = self.cells[r as usize][c as usize];
        }
        Some(window)
    }

    /// Every line of length `CONNECT` that fits on the board
    pub fn windows(&self) -> impl Iterator<Item = [Cell; CONNECT]> + '_ {
        (0..HEIGHT).flat_map(move |row| {
            (0..WIDTH).flat_map(move |column| {
                Direction::ALL
                    .into_iter()
                    .filter_map(move |direction| self.window(row, column, direction))
            })
        })
    }

    /// Whether `player` has a completed line anywhere on the board
    pub fn is_win_for(&self, player: Player) -> bool {
        self.windows()
            .any(|window| window.iter().all(|&cell| cell == Some(player)))
    }

    /// Checks that no tile floats above an empty cell and that the cached
    /// column heights agree with the grid
    pub fn is_well_formed(&self) -> bool {
        (0..WIDTH).all(|column| {
            let filled = (0..HEIGHT)
                .rev()
                .take_while(|&row| self.cells[row][column].is_some())
                .count();
            let above_empty = (0..HEIGHT - filled).all(|row| self.cells[row][column].is_none());
            above_empty && filled == self.heights[column]
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a whitespace separated grid of `HEIGHT` rows of `WIDTH` integers,
/// top row first, where 0 is empty and 1 or 2 is a player's tile
impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut board = Self::new();
        let mut tokens = s.split_whitespace();

        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let token = tokens.next().ok_or_else(|| {
                    anyhow!("Invalid board format at r={}, c={}: missing cell", row, column)
                })?;
                let code = token.parse::<u8>().map_err(|_| {
                    anyhow!("Invalid board format at r={}, c={}: '{}' is not a cell", row, column, token)
                })?;
                board.cells[row][column] = match code {
                    0 => None,
                    _ => Some(Player::from_code(code).ok_or_else(|| {
                        anyhow!("Invalid board format at r={}, c={}: unknown player {}", row, column, code)
                    })?),
                };
            }
        }
        if let Some(extra) = tokens.next() {
            return Err(anyhow!("Invalid board format: unexpected trailing '{}'", extra));
        }

        for column in 0..WIDTH {
            board.heights[column] = (0..HEIGHT)
                .rev()
                .take_while(|&row| board.cells[row][column].is_some())
                .count();
        }
        if !board.is_well_formed() {
            let column = (0..WIDTH)
                .find(|&column| {
                    (0..HEIGHT - board.heights[column]).any(|row| board.cells[row][column].is_some())
                })
                .unwrap_or(0);
            return Err(anyhow!("Invalid board: floating tile in column {}", column));
        }
        Ok(board)
    }
}

/// Writes the board in the same format accepted by its `FromStr` impl
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or(0, Player::code).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// A move played on a borrowed board, undone when this guard is dropped
pub struct TrialMove<'a> {
    board: &'a mut Board,
    column: usize,
    row: usize,
}

impl TrialMove<'_> {
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }
}

impl Deref for TrialMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &*self.board
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.undo(self.column, self.row);
    }
}
