//! Finite Position Game defined by a calendar date.
//!
//! Two players alternately add a move from `{1, ..., day + month}` to a shared running
//! position. The player who lands exactly on `day + month + year` wins.

use crate::display;
use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

/// Finite Position Game played on the position space `[1..day+month+year]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinitePositionGame {
    // Invariant: all components are positive
    day: u32,
    month: u32,
    year: u32,
}

impl Display for FinitePositionGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FPG")?;
        display::parens(f, |f| {
            display::commas(f, [self.day, self.month, self.year])
        })
    }
}

impl FinitePositionGame {
    /// Define a new game. Returns [`None`] if any of the components is zero or the target
    /// position does not fit in [`u32`].
    pub fn new(day: u32, month: u32, year: u32) -> Option<Self> {
        if day == 0 || month == 0 || year == 0 {
            return None;
        }
        day.checked_add(month)?.checked_add(year)?;
        Some(Self { day, month, year })
    }

    /// Day component of the game
    #[inline]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Month component of the game
    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Year component of the game. Does not bound the move size, only shifts the target.
    #[inline]
    pub const fn year(&self) -> u32 {
        self.year
    }

    /// Position a player must land on exactly to win
    #[inline]
    pub const fn target(&self) -> u32 {
        self.day + self.month + self.year
    }

    /// Largest legal move
    #[inline]
    pub const fn max_move(&self) -> u32 {
        self.day + self.month
    }

    /// All legal move values, regardless of the position
    #[inline]
    pub const fn moves(&self) -> RangeInclusive<u32> {
        1..=self.max_move()
    }

    /// All positions a player can move from, i.e. every position below the target
    #[inline]
    pub const fn positions(&self) -> std::ops::Range<u32> {
        1..self.target()
    }

    /// Check if `position` is a position a player can move from
    #[inline]
    pub const fn is_position(&self, position: u32) -> bool {
        position >= 1 && position < self.target()
    }

    /// Check if `mv` can be played from `position` without overshooting the target
    #[inline]
    pub fn is_legal(&self, position: u32, mv: u32) -> bool {
        self.moves().contains(&mv)
            && position
                .checked_add(mv)
                .is_some_and(|next| next <= self.target())
    }
}

/// Error returned when parsing [`FinitePositionGame`] from a `day.month.year` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseGameError {
    /// Input is not three dot separated components
    Format,

    /// One of the components is not a number
    Component(String),

    /// Numbers parsed, but do not define a valid game
    Invalid,
}

impl Display for ParseGameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format => write!(f, "expected date in the format 'day.month.year'"),
            Self::Component(component) => write!(f, "'{}' is not a positive number", component),
            Self::Invalid => write!(f, "day, month and year must all be positive"),
        }
    }
}

impl std::error::Error for ParseGameError {}

impl FromStr for FinitePositionGame {
    type Err = ParseGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s.trim().split('.').collect::<Vec<_>>();
        let [day, month, year] = components[..] else {
            return Err(ParseGameError::Format);
        };

        let parse = |component: &str| {
            component
                .parse::<u32>()
                .map_err(|_| ParseGameError::Component(component.to_owned()))
        };

        Self::new(parse(day)?, parse(month)?, parse(year)?).ok_or(ParseGameError::Invalid)
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for FinitePositionGame {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let bound = (g.size() as u32).clamp(1, 40);
        let mut component = || u32::arbitrary(g) % bound + 1;
        let (day, month, year) = (component(), component(), component());
        Self { day, month, year }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let Self { day, month, year } = *self;
        Box::new(
            [
                Self::new(day - 1, month, year),
                Self::new(day, month - 1, year),
                Self::new(day, month, year - 1),
            ]
            .into_iter()
            .flatten(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_parameters() {
        let game = FinitePositionGame::new(12, 11, 2001).unwrap();
        assert_eq!(game.target(), 2024);
        assert_eq!(game.max_move(), 23);
        assert_eq!(game.moves().count(), 23);
        assert_eq!(game.positions().count(), 2023);
        assert_eq!(game.to_string(), "FPG(12, 11, 2001)");
    }

    #[test]
    fn rejects_non_positive_components() {
        assert_eq!(FinitePositionGame::new(0, 1, 1), None);
        assert_eq!(FinitePositionGame::new(1, 0, 1), None);
        assert_eq!(FinitePositionGame::new(1, 1, 0), None);
        assert_eq!(FinitePositionGame::new(u32::MAX, 1, 1), None);
        assert!(FinitePositionGame::new(1, 1, 1).is_some());
    }

    #[test]
    fn legal_moves() {
        let game = FinitePositionGame::new(1, 2, 3).unwrap();
        assert!(game.is_legal(1, 3));
        assert!(game.is_legal(5, 1));
        assert!(!game.is_legal(5, 2));
        assert!(!game.is_legal(1, 0));
        assert!(!game.is_legal(1, 4));

        assert!(!game.is_position(0));
        assert!(game.is_position(5));
        assert!(!game.is_position(6));
    }

    #[test]
    fn parse_date() {
        assert_eq!(
            "12.11.2001".parse::<FinitePositionGame>(),
            Ok(FinitePositionGame::new(12, 11, 2001).unwrap())
        );
        assert_eq!(
            "12.11".parse::<FinitePositionGame>(),
            Err(ParseGameError::Format)
        );
        assert_eq!(
            "12.xi.2001".parse::<FinitePositionGame>(),
            Err(ParseGameError::Component("xi".to_owned()))
        );
        assert_eq!(
            "1.1.0".parse::<FinitePositionGame>(),
            Err(ParseGameError::Invalid)
        );
    }
}
