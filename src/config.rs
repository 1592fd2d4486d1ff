//! Switches controlling how the search explores the game tree

use std::fmt;

/// The default search depth for interactive play
pub const DEFAULT_DEPTH: usize = 9;

/// Options for a single search, passed by value into the [`Solver`]
///
/// None of the switches change the score of a position, only the amount of
/// work done to find it. Changing the move order can change which of several
/// equally scored columns is chosen.
///
/// [`Solver`]: crate::solver::Solver
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct SearchConfig {
    /// Skip branches that cannot affect the result
    pub alpha_beta: bool,
    /// Visit columns from the middle outwards instead of left to right
    pub move_order: bool,
    /// Return as soon as the side to move has a winning move
    pub early_win: bool,
    /// The number of plies to search, including the move being chosen
    pub depth: usize,
}

impl SearchConfig {
    pub fn new(alpha_beta: bool, move_order: bool, early_win: bool, depth: usize) -> Self {
        Self {
            alpha_beta,
            move_order,
            early_win,
            depth,
        }
    }

    pub fn with_alpha_beta(mut self, alpha_beta: bool) -> Self {
        self.alpha_beta = alpha_beta;
        self
    }

    pub fn with_move_order(mut self, move_order: bool) -> Self {
        self.move_order = move_order;
        self
    }

    pub fn with_early_win(mut self, early_win: bool) -> Self {
        self.early_win = early_win;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// All eight combinations of the three switches at the given depth,
    /// ordered as binary counting over (alpha-beta, move order, early win)
    pub fn all_combinations(depth: usize) -> Vec<Self> {
        let mut configs = Vec::with_capacity(8);
        for alpha_beta in [false, true] {
            for move_order in [false, true] {
                for early_win in [false, true] {
                    configs.push(Self::new(alpha_beta, move_order, early_win, depth));
                }
            }
        }
        configs
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(true, true, true, DEFAULT_DEPTH)
    }
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.alpha_beta as u8, self.move_order as u8, self.early_win as u8
        )
    }
}
