use anyhow::{Result, bail};
use clap::{self, Parser};
use fpg::{
    analyzer::{Analyzer, Suggestion},
    game::FinitePositionGame,
};
use itertools::Itertools;

/// Suggest a move from a single position
#[derive(Parser, Debug)]
pub struct Args {
    /// Game as a date: `day.month.year`
    #[arg(long)]
    game: FinitePositionGame,

    /// Position to move from
    #[arg(long)]
    position: u32,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    if !args.game.is_position(args.position) {
        bail!(
            "Position should belong to [1..{}], got {}",
            args.game.target() - 1,
            args.position
        );
    }

    let analyzer = Analyzer::new_using_closure(args.game);
    match analyzer.suggest_move(args.position, &mut rand::rng()) {
        Suggestion::Winning(mv) => {
            println!("Suggested move: +{}", mv);
            println!(
                "Winning moves: {}",
                analyzer.winning_moves(args.position).iter().join(", ")
            );
        }
        Suggestion::NoWinningStrategy(mv) => {
            println!("You don't have any winning strategy. Random move: +{}", mv);
        }
    }

    Ok(())
}
