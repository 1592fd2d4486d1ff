//! Static evaluation of positions at the search horizon

use crate::board::{Board, Cell, Player};
use crate::{CONNECT, HEIGHT, WIDTH};

/// Weight of a tile in the middle column
pub const CENTER_WEIGHT: i32 = 18;
/// Weight of a tile one column either side of the middle
pub const NEAR_CENTER_WEIGHT: i32 = 6;
/// Weight of a tile two columns either side of the middle
pub const OUTER_CENTER_WEIGHT: i32 = 2;

/// Score of a line holding three of a player's tiles and one empty cell
pub const THREE_SCORE: i32 = 51;
/// Score of a line holding two of a player's tiles and two empty cells
pub const TWO_SCORE: i32 = 17;

/// Positional weight of each column, favouring the middle of the board
pub const fn column_weights() -> [i32; WIDTH] {
    let mut weights = [0; WIDTH];
    let center = WIDTH / 2;
    weights[center] = CENTER_WEIGHT;
    weights[center - 1] = NEAR_CENTER_WEIGHT;
    weights[center + 1] = NEAR_CENTER_WEIGHT;
    weights[center - 2] = OUTER_CENTER_WEIGHT;
    weights[center + 2] = OUTER_CENTER_WEIGHT;
    weights
}

/// Scores a single line of cells from the point of view of `player`.
///
/// Lines containing tiles of both players are blocked and worth nothing.
/// A complete line is also worth nothing here: wins are detected by the
/// search before a position is ever evaluated.
pub fn score_window(window: &[Cell; CONNECT], player: Player) -> i32 {
    let mut own = 0;
    let mut opponent = 0;
    let mut empty = 0;
    for cell in window.iter() {
        match cell {
            Some(p) if *p == player => own += 1,
            Some(_) => opponent += 1,
            None => empty += 1,
        }
    }

    // blocked by both players
    if own > 0 && opponent > 0 {
        return 0;
    }
    match (own, opponent, empty) {
        (3, 0, 1) => THREE_SCORE,
        (2, 0, 2) => TWO_SCORE,
        (0, 3, 1) => -THREE_SCORE,
        (0, 2, 2) => -TWO_SCORE,
        _ => 0,
    }
}

/// Bonus for tiles near the middle column, positive for `player` and
/// negative for the opponent
pub fn center_bonus(board: &Board, player: Player) -> i32 {
    let weights = column_weights();
    let mut score = 0;
    for row in 0..HEIGHT {
        for (column, weight) in weights.iter().enumerate() {
            match board.get(row, column) {
                Some(p) if p == player => score += weight,
                Some(_) => score -= weight,
                None => {}
            }
        }
    }
    score
}

/// Estimates how good a position without a completed line is for `player`
///
/// The score is the center bonus plus the score of every line of four
/// cells on the board. It is antisymmetric, so swapping `player` for the
/// opponent negates it.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    center_bonus(board, player)
        + board
            .windows()
            .map(|window| score_window(&window, player))
            .sum::<i32>()
}
