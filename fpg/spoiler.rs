//! Automated opponent driven by an [`Analyzer`]

use crate::analyzer::Analyzer;
use itertools::Itertools;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::{fmt::Display, iter, str::FromStr};

/// Policy used by [`Spoiler`] to pick its moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Play the winning strategy whenever there is one
    Smart,

    /// Play a random legal move, reproducible for a given position
    Random,

    /// Same moves as [`Mode::Smart`], the winning strategy is also shown to the human player
    Advisor,
}

impl Mode {
    /// All modes in the order they are presented to the player
    pub const ALL: [Mode; 3] = [Mode::Smart, Mode::Random, Mode::Advisor];
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smart => write!(f, "SMART"),
            Self::Random => write!(f, "RANDOM"),
            Self::Advisor => write!(f, "ADVISOR"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "smart" => Ok(Self::Smart),
            "2" | "random" => Ok(Self::Random),
            "3" | "advisor" => Ok(Self::Advisor),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// Opponent of the human player
#[derive(Debug, Clone)]
pub struct Spoiler<'a> {
    analyzer: &'a Analyzer,
    mode: Mode,
}

impl<'a> Spoiler<'a> {
    /// Create a new opponent playing with `mode`
    pub const fn new(analyzer: &'a Analyzer, mode: Mode) -> Self {
        Self { analyzer, mode }
    }

    /// Get the analysis the opponent plays with
    #[inline]
    pub const fn analyzer(&self) -> &'a Analyzer {
        self.analyzer
    }

    /// Get the current policy
    #[inline]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Change the policy, e.g. between two games of a session
    #[inline]
    pub const fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Pick a legal move from `position`.
    ///
    /// Candidates that overshoot the target are resampled. At most one candidate per move value
    /// is tried, so [`None`] means there is no legal move at all, which cannot happen for
    /// positions below the target.
    ///
    /// # Panics
    /// - `position` is not in `[1..target-1]`
    pub fn make_move<R>(&self, position: u32, rng: &mut R) -> Option<u32>
    where
        R: Rng + ?Sized,
    {
        let game = self.analyzer.game();
        assert!(
            game.is_position(position),
            "Position {} is outside of [1..{}]",
            position,
            game.target() - 1
        );

        match self.mode {
            Mode::Smart | Mode::Advisor => {
                let suggestion = self.analyzer.suggest_move(position, rng).value();
                let mut fallback = game.moves().collect::<Vec<_>>();
                fallback.shuffle(rng);
                self.first_legal(position, iter::once(suggestion).chain(fallback))
            }
            Mode::Random => {
                let mut rng = StdRng::seed_from_u64(u64::from(position));
                let mut candidates = game.moves().collect::<Vec<_>>();
                candidates.shuffle(&mut rng);
                self.first_legal(position, candidates)
            }
        }
    }

    fn first_legal(&self, position: u32, candidates: impl IntoIterator<Item = u32>) -> Option<u32> {
        let game = self.analyzer.game();
        candidates
            .into_iter()
            .unique()
            .take(game.max_move() as usize)
            .find(|&mv| game.is_legal(position, mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyzer::Outcome, game::FinitePositionGame};

    fn analyzer(day: u32, month: u32, year: u32) -> Analyzer {
        Analyzer::new_using_closure(FinitePositionGame::new(day, month, year).unwrap())
    }

    #[test]
    fn smart_spoiler_plays_winning_moves() {
        let analyzer = analyzer(3, 2, 10);
        let mut rng = StdRng::seed_from_u64(7);
        for mode in [Mode::Smart, Mode::Advisor] {
            let spoiler = Spoiler::new(&analyzer, mode);
            for position in analyzer.winning_positions() {
                let mv = spoiler.make_move(position, &mut rng).unwrap();
                assert!(analyzer.winning_moves(position).contains(&mv));
            }
        }
    }

    #[test]
    fn moves_never_overshoot() {
        let analyzer = analyzer(4, 4, 3);
        let game = *analyzer.game();
        let mut rng = StdRng::seed_from_u64(0);
        for mode in Mode::ALL {
            let spoiler = Spoiler::new(&analyzer, mode);
            for position in game.positions() {
                for _ in 0..8 {
                    let mv = spoiler.make_move(position, &mut rng).unwrap();
                    assert!(game.is_legal(position, mv), "{mode} {position} +{mv}");
                }
            }
        }
    }

    #[test]
    fn losing_spoiler_still_moves() {
        let analyzer = analyzer(1, 2, 3);
        assert_eq!(analyzer.outcome(2), Outcome::Losing);
        let spoiler = Spoiler::new(&analyzer, Mode::Smart);
        let mv = spoiler.make_move(2, &mut rand::rng()).unwrap();
        assert!((1..=3).contains(&mv));
    }

    #[test]
    fn random_spoiler_is_reproducible_per_position() {
        let analyzer = analyzer(6, 5, 20);
        let mut spoiler = Spoiler::new(&analyzer, Mode::Smart);
        spoiler.set_mode(Mode::Random);
        assert_eq!(spoiler.mode(), Mode::Random);

        for position in analyzer.game().positions() {
            let first = spoiler.make_move(position, &mut rand::rng());
            let second = spoiler.make_move(position, &mut rand::rng());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn parse_mode() {
        assert_eq!("1".parse(), Ok(Mode::Smart));
        assert_eq!("Random".parse(), Ok(Mode::Random));
        assert_eq!(" advisor ".parse(), Ok(Mode::Advisor));
        assert!("4".parse::<Mode>().is_err());
    }
}
