use crate::{io::FileOrStdout, progress_bar::ProgressBar};
use anyhow::{Context, Result};
use clap::{self, Parser, ValueEnum};
use fpg::{
    analyzer::{Analyzer, Outcome},
    game::FinitePositionGame,
};
use serde::Serialize;
use std::io::{BufWriter, Write, stderr};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Method {
    /// Closure by offsets
    Closure,
    /// Direct one step induction
    Minimax,
}

#[derive(Debug, Clone, Serialize)]
struct Report<'a> {
    position: u32,
    outcome: Outcome,
    winning_moves: &'a [u32],
}

/// Classify every position of the game and list the moves that keep the win
#[derive(Parser, Debug)]
pub struct Args {
    /// Game as a date: `day.month.year`
    #[arg(long)]
    game: FinitePositionGame,

    /// Output path for newline separated JSON reports
    #[arg(long, default_value = "-")]
    output: FileOrStdout,

    #[arg(long, value_enum, default_value_t = Method::Closure)]
    method: Method,

    /// Show progress bar on stderr
    #[arg(long)]
    progress: bool,
}

pub fn analyze(game: FinitePositionGame, method: Method, progress: bool) -> Analyzer {
    let mut bar = ProgressBar::new(stderr(), 50);
    match (method, progress) {
        (Method::Closure, true) => Analyzer::new_using_closure_with_progress(game, &mut bar),
        (Method::Closure, false) => Analyzer::new_using_closure(game),
        (Method::Minimax, true) => Analyzer::new_using_minimax_with_progress(game, &mut bar),
        (Method::Minimax, false) => Analyzer::new_using_minimax(game),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let analyzer = analyze(args.game, args.method, args.progress);

    let mut output = BufWriter::new(
        args.output
            .create()
            .context(format!("Could not create file '{}'", args.output))?,
    );
    for position in analyzer.game().positions() {
        let report = Report {
            position,
            outcome: analyzer.outcome(position),
            winning_moves: analyzer.winning_moves(position),
        };
        writeln!(output, "{}", serde_json::ser::to_string(&report)?)
            .context(format!("Could not write to file '{}'", args.output))?;
    }
    output.flush()?;

    eprintln!(
        "{}: {} winning, {} losing positions",
        analyzer.game(),
        analyzer.winning_positions().count(),
        analyzer.losing_positions().count()
    );

    Ok(())
}
