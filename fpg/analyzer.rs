//! Backward induction over the position space of a [`FinitePositionGame`].
//!
//! Every position below the target is classified as [winning](Outcome::Winning) or
//! [losing](Outcome::Losing) for the player about to move, and every winning position gets
//! the set of moves that keep the win.

use crate::{display, game::FinitePositionGame};
use rand::{Rng, seq::IndexedRandom};
use std::fmt::Display;

/// Outcome of a position for the player about to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    /// Player to move can force landing on the target
    Winning,

    /// Every legal move hands the opponent a winning position
    Losing,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winning => write!(f, "winning"),
            Self::Losing => write!(f, "losing"),
        }
    }
}

/// Move recommended by [`Analyzer::suggest_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    /// Move that keeps the forced win
    Winning(u32),

    /// There is no winning strategy, move is picked at random from all move values and may
    /// overshoot the target
    NoWinningStrategy(u32),
}

impl Suggestion {
    /// Get the suggested move value
    #[inline]
    pub const fn value(self) -> u32 {
        match self {
            Self::Winning(mv) | Self::NoWinningStrategy(mv) => mv,
        }
    }

    /// Check if the suggestion comes from a winning strategy
    #[inline]
    pub const fn is_winning(self) -> bool {
        matches!(self, Self::Winning(_))
    }
}

/// Observer of analysis progress
pub trait Progress {
    /// Called after `done` out of `total` positions were processed
    fn report(&mut self, done: u32, total: u32);
}

impl Progress for () {
    #[inline(always)]
    fn report(&mut self, _done: u32, _total: u32) {}
}

/// Solved [`FinitePositionGame`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analyzer {
    game: FinitePositionGame,

    // Invariant: `winning_moves[p - 1]` is empty iff `p` is losing
    winning_moves: Vec<Vec<u32>>,
}

impl Display for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.game)?;
        for position in self.game.positions() {
            write!(f, "{}: ", position)?;
            display::braces(f, |f| display::commas(f, self.winning_moves(position)))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[inline]
fn contains(set: &[bool], position: usize) -> bool {
    set.get(position).copied().unwrap_or(false)
}

impl Analyzer {
    /// Solve using closure by offsets. See [`Self::new_using_closure_with_progress`].
    pub fn new_using_closure(game: FinitePositionGame) -> Self {
        Self::new_using_closure_with_progress(game, &mut ())
    }

    /// Solve using closure by offsets.
    ///
    /// Closed set starts with the positions one move away from the target. Remaining
    /// positions are visited from the target down. A move `m` from `p` is safe if `p + m` is
    /// not closed yet, but every position reachable from `p + m` in one move is. Position with
    /// at least one safe move joins the closed set. Positions that never join are losing.
    pub fn new_using_closure_with_progress(
        game: FinitePositionGame,
        progress: &mut impl Progress,
    ) -> Self {
        let target = game.target() as usize;
        let total = game.target() - 1;
        let mut winning_moves = vec![Vec::new(); total as usize];
        let mut closed = vec![false; target];
        let mut seeded = vec![false; target];

        // Base case: move straight onto the target
        for mv in game.moves() {
            let Some(position) = game.target().checked_sub(mv).filter(|&p| p >= 1) else {
                continue;
            };
            closed[position as usize] = true;
            seeded[position as usize] = true;
            winning_moves[position as usize - 1].push(mv);
        }

        progress.report(0, total);
        for position in game.positions().rev() {
            let p = position as usize;
            if !seeded[p] {
                for mv in game.moves() {
                    let next = p + mv as usize;
                    if contains(&seeded, next) {
                        continue;
                    }

                    let responses_closed = game
                        .moves()
                        .all(|response| contains(&closed, next + response as usize));
                    if responses_closed {
                        closed[p] = true;
                        winning_moves[p - 1].push(mv);
                    }
                }
            }
            progress.report(game.target() - position, total);
        }

        Self {
            game,
            winning_moves,
        }
    }

    /// Solve using direct one step backward induction. See
    /// [`Self::new_using_minimax_with_progress`].
    pub fn new_using_minimax(game: FinitePositionGame) -> Self {
        Self::new_using_minimax_with_progress(game, &mut ())
    }

    /// Solve using direct one step backward induction: position is winning iff there is a
    /// move onto the target or onto a losing position.
    pub fn new_using_minimax_with_progress(
        game: FinitePositionGame,
        progress: &mut impl Progress,
    ) -> Self {
        let target = game.target();
        let total = target - 1;
        let mut winning_moves = vec![Vec::new(); total as usize];
        let mut losing = vec![false; target as usize];

        progress.report(0, total);
        for position in game.positions().rev() {
            let moves = game
                .moves()
                .filter(|&mv| {
                    let next = position + mv;
                    next == target || (next < target && losing[next as usize])
                })
                .collect::<Vec<_>>();

            losing[position as usize] = moves.is_empty();
            winning_moves[position as usize - 1] = moves;
            progress.report(target - position, total);
        }

        Self {
            game,
            winning_moves,
        }
    }

    /// Get the analyzed game
    #[inline]
    pub const fn game(&self) -> &FinitePositionGame {
        &self.game
    }

    #[inline]
    fn index(&self, position: u32) -> usize {
        assert!(
            self.game.is_position(position),
            "Position {} is outside of [1..{}]",
            position,
            self.game.target() - 1
        );
        position as usize - 1
    }

    /// Get moves from `position` that keep the forced win. Empty iff `position` is losing.
    ///
    /// # Panics
    /// - `position` is not in `[1..target-1]`
    pub fn winning_moves(&self, position: u32) -> &[u32] {
        &self.winning_moves[self.index(position)]
    }

    /// Get the outcome of `position`
    ///
    /// # Panics
    /// - `position` is not in `[1..target-1]`
    pub fn outcome(&self, position: u32) -> Outcome {
        if self.winning_moves(position).is_empty() {
            Outcome::Losing
        } else {
            Outcome::Winning
        }
    }

    /// Iterate over all winning positions in ascending order
    pub fn winning_positions(&self) -> impl Iterator<Item = u32> + '_ {
        self.game
            .positions()
            .filter(|&position| self.outcome(position) == Outcome::Winning)
    }

    /// Iterate over all losing positions in ascending order
    pub fn losing_positions(&self) -> impl Iterator<Item = u32> + '_ {
        self.game
            .positions()
            .filter(|&position| self.outcome(position) == Outcome::Losing)
    }

    /// Suggest a move from `position`. Winning move is picked uniformly from
    /// [`Self::winning_moves`], otherwise any move value is picked uniformly.
    ///
    /// # Panics
    /// - `position` is not in `[1..target-1]`
    pub fn suggest_move<R>(&self, position: u32, rng: &mut R) -> Suggestion
    where
        R: Rng + ?Sized,
    {
        match self.winning_moves(position).choose(rng) {
            Some(&mv) => Suggestion::Winning(mv),
            None => Suggestion::NoWinningStrategy(rng.random_range(self.game.moves())),
        }
    }
}
