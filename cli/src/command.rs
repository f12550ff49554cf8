use std::str::FromStr;

use luckysweep_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command, type `help` for the list")]
    Empty,
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` expects a row and a column")]
    MissingCoords(&'static str),
    #[error("`{0}` is not a valid row or column")]
    BadCoord(String),
    #[error("too many arguments")]
    Trailing,
}

pub const HELP: &str = "\
commands:
  r ROW COL   reveal a cell
  f ROW COL   toggle a flag
  s           show the grid
  h           this help
  q           quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords("reveal", &mut words)?),
            "f" | "flag" => Self::Flag(parse_coords("flag", &mut words)?),
            "s" | "show" => Self::Show,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.into())),
        };

        if words.next().is_some() {
            return Err(CommandError::Trailing);
        }
        Ok(command)
    }
}

fn parse_coords<'a>(
    verb: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let mut next = || -> Result<Coord, CommandError> {
        let word = words.next().ok_or(CommandError::MissingCoords(verb))?;
        word.parse()
            .map_err(|_| CommandError::BadCoord(word.into()))
    };
    let row = next()?;
    let col = next()?;
    Ok((row, col))
}
