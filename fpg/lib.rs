//! Finite Position Game solver.
//!
//! A [game](crate::game::FinitePositionGame) is solved once by
//! [backward induction](crate::analyzer::Analyzer) and then queried for
//! [move suggestions](crate::analyzer::Analyzer::suggest_move), either by a human player or
//! by an automated [opponent](crate::spoiler::Spoiler).

#![warn(missing_docs)]

pub mod analyzer;
pub mod game;
pub mod spoiler;

mod display;
