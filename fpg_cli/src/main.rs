use crate::commands::*;
use anyhow::Result;
use clap::{self, Parser, Subcommand};

mod commands;
mod io;
mod progress_bar;

#[cfg(not(windows))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[derive(Subcommand, Debug)]
enum Command {
    Analyze(analyze::Args),
    Suggest(suggest::Args),
    Play(play::Args),
}

#[derive(Parser)]
/// Finite Position Game: land exactly on day + month + year to win
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Analyze(args) => analyze::run(args),
        Command::Suggest(args) => suggest::run(args),
        Command::Play(args) => play::run(args),
    }
}
