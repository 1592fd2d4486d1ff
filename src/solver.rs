//! A depth-limited minimax agent for Connect 4

use log::{debug, info, trace};

use crate::{
    board::{Board, Player},
    config::SearchConfig,
    heuristic::evaluate,
    WIDTH,
};

use std::fmt;

/// Base score of a won position, before the remaining depth is added
pub const WIN_SCORE: i32 = 100_000;
/// Scores strictly beyond this magnitude are forced wins or losses
pub const WIN_THRESHOLD: i32 = WIN_SCORE - 1;

/// Returns a slice ordering the columns from the middle outwards, as
/// the middle columns are often better moves.
/// The left neighbour is tried before the right one.
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = (WIDTH / 2) + (1 - i % 2) * (i / 2) - (i % 2) * (i / 2 + 1);
        i += 1;
    }
    move_order
}

/// Returns the columns from left to right
pub const fn natural_order() -> [usize; WIDTH] {
    let mut order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        order[i] = i;
        i += 1;
    }
    order
}

/// The move chosen by a search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BestMove {
    Column(usize),
    /// No column has room, the game is drawn
    Draw,
}

impl BestMove {
    pub fn column(self) -> Option<usize> {
        match self {
            BestMove::Column(column) => Some(column),
            BestMove::Draw => None,
        }
    }
}

/// What a score means for the player it was computed for
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    /// A win is forced within this many plies
    Win(usize),
    /// The opponent can force a win within this many plies
    Loss(usize),
    /// Nothing was proven within the search depth
    Estimate(i32),
}

impl Outcome {
    /// Interprets a score returned by a search of `depth` plies
    pub fn from_score(score: i32, depth: usize) -> Self {
        if score > WIN_THRESHOLD {
            Outcome::Win(depth.saturating_sub((score - WIN_SCORE) as usize))
        } else if score < -WIN_THRESHOLD {
            Outcome::Loss(depth.saturating_sub((-score - WIN_SCORE) as usize))
        } else {
            Outcome::Estimate(score)
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plies = |n: usize| if n == 1 { "ply" } else { "plies" };
        match *self {
            Outcome::Win(n) => write!(f, "wins in {} {}", n, plies(n)),
            Outcome::Loss(n) => write!(f, "loses in {} {}", n, plies(n)),
            Outcome::Estimate(score) => write!(f, "estimate {}", score),
        }
    }
}

/// The result of a top-level search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: BestMove,
    /// Score of the chosen column, 0 for a draw
    pub score: i32,
    /// Score of every column that was searched
    pub column_scores: [Option<i32>; WIDTH],
    /// Whether the move was found by the immediate-win shortcut
    pub immediate_win: bool,
    pub node_count: usize,
}

impl SearchResult {
    fn draw() -> Self {
        Self {
            best_move: BestMove::Draw,
            score: 0,
            column_scores: [None; WIDTH],
            immediate_win: false,
            node_count: 0,
        }
    }
}

/// An agent choosing moves by depth-limited minimax search
///
/// # Position Scoring
/// Scores are from the point of view of the player the search is run for.
/// A position where that player has completed a line scores
/// `WIN_SCORE + d`, where `d` is the depth left unsearched when the line was
/// found, so faster wins score higher. Lost positions mirror this below zero.
/// Any other score is the heuristic estimate of [`evaluate`] at the search
/// horizon, or 0 for a full board.
#[derive(Clone, Debug)]
pub struct Solver {
    config: SearchConfig,
    order: [usize; WIDTH],

    /// The number of nodes searched by the last search (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            order: if config.move_order {
                move_order()
            } else {
                natural_order()
            },
            node_count: 0,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// The order columns are visited in at every level of the search
    pub fn column_order(&self) -> [usize; WIDTH] {
        self.order
    }

    /// Finds the first column in visiting order where `player` completes a line
    pub fn winning_move(&self, board: &mut Board, player: Player) -> Option<usize> {
        self.order
            .iter()
            .copied()
            .find(|&column| board.is_winning_move(column, player))
    }

    /// Performs game tree search
    ///
    /// Returns the score of the position for `player` (see [Position Scoring])
    ///
    /// [Position Scoring]: #position-scoring
    fn minimax(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.node_count += 1;

        // player's line wins ties, the position can't arise in real play anyway
        if board.is_win_for(player) {
            return WIN_SCORE + depth as i32;
        }
        if board.is_win_for(player.opponent()) {
            return -WIN_SCORE - depth as i32;
        }

        if depth == 0 {
            return evaluate(board, player);
        }

        // check for draw
        if !board.has_any_legal_move() {
            return 0;
        }

        let mover = if maximizing { player } else { player.opponent() };

        // a winning move scores what the child would have scored one level down
        if self.config.early_win && self.winning_move(board, mover).is_some() {
            let score = WIN_SCORE + depth as i32 - 1;
            return if maximizing { score } else { -score };
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for column in self.order {
            let score = match board.trial(column, mover) {
                Some(mut child) => {
                    self.minimax(&mut child, player, depth - 1, alpha, beta, !maximizing)
                }
                None => continue,
            };

            if maximizing {
                best = best.max(score);
                if self.config.alpha_beta {
                    alpha = alpha.max(score);
                }
            } else {
                best = best.min(score);
                if self.config.alpha_beta {
                    beta = beta.min(score);
                }
            }

            // the other player will never allow this branch
            if self.config.alpha_beta && beta <= alpha {
                trace!("pruned at depth {} after column {}", depth, column);
                break;
            }
        }
        best
    }

    /// Scores the position for `player`, who is to move, searching the
    /// configured number of plies
    pub fn search(&mut self, board: &mut Board, player: Player) -> i32 {
        self.node_count = 0;
        self.minimax(board, player, self.config.depth, i32::MIN, i32::MAX, true)
    }

    /// Chooses the best column for `player`, who is to move
    ///
    /// Every legal column is searched with a full window, so the score of
    /// each column is exact. Equal scores keep the column visited first.
    /// The board is left as it was found.
    pub fn best_move(&mut self, board: &mut Board, player: Player) -> SearchResult {
        debug_assert!(board.is_well_formed(), "searching a malformed board:\n{}", board);

        self.node_count = 0;
        // the move being chosen is always searched
        let depth = self.config.depth.max(1);
        // a win on this move, the best score any column can have
        let fastest_win = WIN_SCORE + depth as i32 - 1;

        let mut result = SearchResult::draw();

        if self.config.early_win {
            if let Some(column) = self.winning_move(board, player) {
                info!("column {}: immediate win", column);
                result.best_move = BestMove::Column(column);
                result.score = fastest_win;
                result.column_scores[column] = Some(fastest_win);
                result.immediate_win = true;
                return result;
            }
        }

        let mut best_score = i32::MIN;
        for column in self.order {
            let score = match board.trial(column, player) {
                Some(mut child) => {
                    self.minimax(&mut child, player, depth - 1, i32::MIN, i32::MAX, false)
                }
                None => continue,
            };
            result.column_scores[column] = Some(score);
            debug!(
                "column {}: {} ({})",
                column,
                score,
                Outcome::from_score(score, depth)
            );

            if score > best_score {
                best_score = score;
                result.best_move = BestMove::Column(column);
                result.score = score;
            }
            if score == fastest_win {
                break;
            }
        }

        result.node_count = self.node_count;
        match result.best_move {
            BestMove::Column(column) => info!(
                "best column {} with score {} after {} nodes",
                column, result.score, result.node_count
            ),
            BestMove::Draw => info!("no legal columns, the game is drawn"),
        }
        result
    }

    /// Converts a score from the last configured search into its meaning
    pub fn outcome(&self, score: i32) -> Outcome {
        Outcome::from_score(score, self.config.depth.max(1))
    }
}
