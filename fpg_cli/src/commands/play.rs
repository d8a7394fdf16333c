use self::{
    console::{Console, InputClosed},
    transcript::{Log, Player, Transcript},
};
use crate::{
    commands::analyze::{self, Method},
    io::{self, Tee},
};
use anyhow::{Context, Result, bail};
use clap::{self, Parser};
use fpg::{
    analyzer::Analyzer,
    game::FinitePositionGame,
    spoiler::{Mode, Spoiler},
};
use rand::Rng;
use std::{
    io::{BufRead, Write, stdin, stdout},
    path::PathBuf,
};

mod console;
mod transcript;

/// Play against the program. Duplicator (you) moves first, Spoiler (program) answers.
#[derive(Parser, Debug)]
pub struct Args {
    /// Game as a date: `day.month.year`
    #[arg(long, default_value = "12.11.2001")]
    game: FinitePositionGame,

    /// Directory for the console log and game transcripts
    #[arg(long, default_value = "./logs")]
    logs_dir: PathBuf,

    /// Playing mode: smart, random or advisor. Asked before every game if not set
    #[arg(long)]
    mode: Option<Mode>,

    /// Starting position. Asked before every game if not set
    #[arg(long)]
    start: Option<u32>,
}

const MODE_PROMPT: &str = "\nChoose the playing mode [1,2,3]:\n\
                           [1] Smart (program uses a winning strategy)\n\
                           [2] Random (program makes random moves)\n\
                           [3] Advisor (program advises a winning strategy)";

fn ask_starting_position<R, W>(
    console: &mut Console<R, W>,
    game: &FinitePositionGame,
    rng: &mut impl Rng,
) -> Result<u32>
where
    R: BufRead,
    W: Write,
{
    if console.ask_yes_no("Select starting position at random? [Y/N]")? {
        return Ok(rng.random_range(game.positions()));
    }

    let last = game.target() - 1;
    console.ask_number(
        &format!("\nSpecify starting position in the range [1..{}]", last),
        &format!(
            "\nThe starting position should be numeric and belong to [1..{}]. Try again:",
            last
        ),
        1..=last,
    )
}

fn ask_mode<R, W>(console: &mut Console<R, W>) -> Result<Mode>
where
    R: BufRead,
    W: Write,
{
    console.ask(
        MODE_PROMPT,
        "\nThe answer is either '1', '2' or '3'. Try again:",
        |answer| {
            answer
                .parse::<usize>()
                .ok()
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| Mode::ALL.get(idx).copied())
        },
    )
}

fn ask_move<R, W>(
    console: &mut Console<R, W>,
    spoiler: &Spoiler,
    position: u32,
    rng: &mut impl Rng,
) -> Result<u32>
where
    R: BufRead,
    W: Write,
{
    let game = spoiler.analyzer().game();
    let mut message = format!(
        "\nCurrent position is {}. Choose a move in the range of [1..{}].",
        position,
        game.max_move()
    );
    if spoiler.mode() == Mode::Advisor {
        let suggestion = spoiler.analyzer().suggest_move(position, rng);
        if !suggestion.is_winning() {
            message.push_str("\nYou don't have any winning strategy. Return random move.");
        }
        message = format!("{} Advisor suggestion is +{}.", message, suggestion.value());
    }
    let warning = format!(
        "\nThe move should be numeric and belong to [1..{}]. Try again:",
        game.max_move()
    );

    let mut mv = console.ask_number(&message, &warning, game.moves())?;
    while !game.is_legal(position, mv) {
        let retry = format!(
            "Impossible position, it should belong to [1..{}].\n{}",
            game.target(),
            message
        );
        mv = console.ask_number(&retry, &warning, game.moves())?;
    }
    Ok(mv)
}

/// Alternate turns until somebody lands on the target. Returns the winner.
fn play_game<R, W, T>(
    console: &mut Console<R, W>,
    spoiler: &Spoiler,
    mut position: u32,
    transcript: &mut Transcript<T>,
    rng: &mut impl Rng,
) -> Result<Player>
where
    R: BufRead,
    W: Write,
    T: Write,
{
    let target = spoiler.analyzer().game().target();
    let mut turn = Player::Duplicator;
    loop {
        let mv = match turn {
            Player::Duplicator => ask_move(console, spoiler, position, rng)?,
            Player::Spoiler => spoiler
                .make_move(position, rng)
                .context(format!("Spoiler has no legal move from {}", position))?,
        };

        let from = position;
        position += mv;
        writeln!(console, "\n{} makes move +{}: {} -> {}", turn, mv, from, position)?;
        transcript.log(&Log::Move {
            player: turn,
            from,
            to: position,
            value: mv,
        })?;

        if position == target {
            writeln!(console, "{} wins!", turn)?;
            transcript.log(&Log::Winner { player: turn })?;
            return Ok(turn);
        }
        turn = turn.opponent();
    }
}

fn configuration(game: &FinitePositionGame, starting_position: u32, mode: Mode) -> String {
    format!(
        "\n----------CONFIGURATIONS----------\n\n\
         Possible positions:\t[1..{}]\n\
         Possible moves:\t\t[1..{}]\n\
         Starting position:\t{}\n\
         Final position:\t\t{}\n\
         Playing mode:\t\t{}\n\n\
         ----------------------------------\n",
        game.target() - 1,
        game.max_move(),
        starting_position,
        game.target(),
        mode
    )
}

fn play_session<R, W>(
    args: &Args,
    analyzer: &Analyzer,
    console: &mut Console<R, W>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let game = analyzer.game();
    let started = chrono::Local::now()
        .format("%Y-%m-%d %H.%M.%S")
        .to_string();
    let mut rng = rand::rng();
    let mut spoiler = Spoiler::new(analyzer, Mode::Smart);

    let mut games_played = 0;
    while games_played == 0 || console.ask_yes_no("\nDo you want to play again? [Y/N]")? {
        games_played += 1;
        writeln!(console, "\nGame session #{} started.", games_played)?;

        let starting_position = match args.start {
            Some(position) => position,
            None => ask_starting_position(console, game, &mut rng)?,
        };
        let mode = match args.mode {
            Some(mode) => mode,
            None => ask_mode(console)?,
        };
        spoiler.set_mode(mode);
        writeln!(console, "{}", configuration(game, starting_position, mode))?;

        let transcript_name = format!("Session {} play {}.log", started, games_played);
        let mut transcript = Transcript::new(
            io::append_to(&args.logs_dir, &transcript_name)
                .context(format!("Could not open transcript '{}'", transcript_name))?,
        );
        transcript.log(&Log::Configuration {
            game: *game,
            starting_position,
            mode,
        })?;

        play_game(console, &spoiler, starting_position, &mut transcript, &mut rng)?;
    }

    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    if args.start.is_some_and(|start| !args.game.is_position(start)) {
        bail!(
            "Starting position should belong to [1..{}]",
            args.game.target() - 1
        );
    }

    ctrlc::set_handler(|| {
        eprintln!("\nThe program was terminated.");
        std::process::exit(130);
    })
    .context("Could not set Ctrl-C handler")?;

    let console_log = io::append_to(&args.logs_dir, "output.log").context(format!(
        "Could not open console log in '{}'",
        args.logs_dir.display()
    ))?;
    let mut console = Console::new(stdin().lock(), Tee::new(stdout(), console_log));

    writeln!(console, "Analyzing {}.", args.game)?;
    let analyzer = analyze::analyze(args.game, Method::Closure, true);

    match play_session(&args, &analyzer, &mut console) {
        Err(err) if err.is::<InputClosed>() => {}
        other => other?,
    }
    writeln!(console, "\nThe program was terminated.")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::io::Cursor;

    fn play(
        game: (u32, u32, u32),
        mode: Mode,
        start: u32,
        input: &str,
    ) -> (Player, String, String) {
        let game = FinitePositionGame::new(game.0, game.1, game.2).unwrap();
        let analyzer = Analyzer::new_using_closure(game);
        let spoiler = Spoiler::new(&analyzer, mode);
        let mut output = Vec::new();
        let mut log = Vec::new();
        let winner = play_game(
            &mut Console::new(Cursor::new(input.to_owned()), &mut output),
            &spoiler,
            start,
            &mut Transcript::new(&mut log),
            &mut StdRng::seed_from_u64(11),
        )
        .unwrap();

        (
            winner,
            String::from_utf8(output).unwrap(),
            String::from_utf8(log).unwrap(),
        )
    }

    #[test]
    fn duplicator_lands_on_target() {
        let (winner, output, log) = play((1, 1, 1), Mode::Smart, 1, "2\n");
        assert_eq!(winner, Player::Duplicator);
        assert!(output.contains("Duplicator makes move +2: 1 -> 3"));
        assert!(output.ends_with("Duplicator wins!\n"));
        assert_eq!(log.lines().count(), 2);
    }

    #[test]
    fn smart_spoiler_punishes_losing_start() {
        let (winner, output, _) = play((1, 2, 3), Mode::Smart, 2, "1\n");
        assert_eq!(winner, Player::Spoiler);
        assert!(output.contains("Spoiler makes move +3: 3 -> 6"));
    }

    #[test]
    fn overshooting_move_is_asked_again() {
        let (winner, output, _) = play((1, 2, 3), Mode::Random, 5, "3\n1\n");
        assert_eq!(winner, Player::Duplicator);
        assert!(output.contains("Impossible position, it should belong to [1..6]."));
    }

    #[test]
    fn advisor_shows_suggestion() {
        let (_, output, _) = play((1, 2, 3), Mode::Advisor, 4, "2\n1\n");
        assert!(output.contains("Current position is 4. Choose a move in the range of [1..3]. Advisor suggestion is +2."));
    }

    #[test]
    fn advisor_admits_losing_position() {
        let (_, output, _) = play((1, 2, 3), Mode::Advisor, 2, "1\n");
        assert!(output.contains("You don't have any winning strategy."));
    }

    #[test]
    fn mode_by_number() {
        let mut console = Console::new(Cursor::new("0\n4\n3\n"), Vec::new());
        assert_eq!(ask_mode(&mut console).unwrap(), Mode::Advisor);
    }
}
