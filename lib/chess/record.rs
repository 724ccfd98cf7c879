use super::{Color, Outcome, Position, San};
use std::fmt::{self, Display};

/// The description of a refereed chess game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Record {
    pub white: String,
    pub black: String,
    pub start: Position,
    pub moves: Vec<San>,
    pub outcome: Outcome,
}

impl Default for Record {
    fn default() -> Self {
        Record {
            white: "?".into(),
            black: "?".into(),
            start: Position::default(),
            moves: Vec::new(),
            outcome: Outcome::Unknown,
        }
    }
}

impl Record {
    fn termination(&self) -> &'static str {
        match self.outcome {
            Outcome::FailureExhausted(_) => "rules infraction",
            Outcome::Unknown => "unterminated",
            _ => "normal",
        }
    }
}

/// Prints the [PGN] description of the game.
///
/// [PGN]: https://www.chessprogramming.org/Portable_Game_Notation
impl Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[White {:?}]", self.white)?;
        writeln!(f, "[Black {:?}]", self.black)?;
        writeln!(f, "[Result {:?}]", self.outcome.result())?;
        writeln!(f, "[Termination {:?}]", self.termination())?;

        if self.start != Position::default() {
            writeln!(f, "[SetUp \"1\"]")?;
            writeln!(f, "[FEN \"{}\"]", self.start)?;
        }

        writeln!(f)?;

        let offset = match self.start.turn() {
            Color::White => 0,
            Color::Black => 1,
        };

        let first = self.start.fullmoves().get() as usize;
        for (i, san) in self.moves.iter().enumerate() {
            let ply = i + offset;
            if ply % 2 == 0 {
                write!(f, "{}. ", first + ply / 2)?;
            } else if i == 0 {
                write!(f, "{}... ", first)?;
            }

            write!(f, "{} ", san)?;
        }

        write!(f, "{{{}}} {}", self.outcome, self.outcome.result())
    }
}
