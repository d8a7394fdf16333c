use anyhow::Result;
use fpg::{game::FinitePositionGame, spoiler::Mode};
use serde::Serialize;
use std::{fmt::Display, io::Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    /// Human
    Duplicator,
    /// Program
    Spoiler,
}

impl Player {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Duplicator => Self::Spoiler,
            Self::Spoiler => Self::Duplicator,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicator => write!(f, "Duplicator"),
            Self::Spoiler => write!(f, "Spoiler"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum Log {
    Configuration {
        game: FinitePositionGame,
        starting_position: u32,
        mode: Mode,
    },
    Move {
        player: Player,
        from: u32,
        to: u32,
        value: u32,
    },
    Winner {
        player: Player,
    },
}

/// Move history of a single game, one JSON object per line
pub struct Transcript<W> {
    out: W,
}

impl<W> Transcript<W>
where
    W: Write,
{
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn log(&mut self, log: &Log) -> Result<()> {
        writeln!(self.out, "{}", serde_json::ser::to_string(log)?)?;
        self.out.flush()?;
        Ok(())
    }
}

#[test]
fn logs_are_json_lines() {
    let mut out = Vec::new();
    {
        let mut transcript = Transcript::new(&mut out);
        transcript
            .log(&Log::Move {
                player: Player::Spoiler,
                from: 3,
                to: 5,
                value: 2,
            })
            .unwrap();
        transcript
            .log(&Log::Winner {
                player: Player::Spoiler.opponent(),
            })
            .unwrap();
    }
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"Move\":{\"player\":\"Spoiler\",\"from\":3,\"to\":5,\"value\":2}}\n\
         {\"Winner\":{\"player\":\"Duplicator\"}}\n"
    );
}
