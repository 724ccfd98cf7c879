use super::Spectator;
use crate::chess::{Position, Square};
use std::fmt::{self, Display};
use std::io::{self, Write};
use tracing::{instrument, warn};

/// A [`Spectator`] that draws the board on a text stream.
#[derive(Debug)]
pub struct Terminal<W: Write> {
    writer: W,
}

impl<W: Write> Terminal<W> {
    pub fn new(writer: W) -> Self {
        Terminal { writer }
    }

    /// Consumes the spectator, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl Terminal<io::Stderr> {
    /// A [`Terminal`] that draws on the standard error stream.
    pub fn stderr() -> Self {
        Terminal::new(io::stderr())
    }
}

impl<W: Write> Spectator for Terminal<W> {
    #[instrument(level = "trace", skip(self), fields(%pos))]
    fn render(&mut self, pos: &Position) {
        if let Err(e) = writeln!(self.writer, "{}\n{}\n", Diagram(pos), pos) {
            warn!(%e, "failed to render the board");
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn teardown(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!(%e, "failed to flush the board");
        }
    }
}

struct Diagram<'a>(&'a Position);

impl<'a> Display for Diagram<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "     a   b   c   d   e   f   g   h")?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for rank in (0..8).rev() {
            write!(f, " {} |", rank + 1)?;

            for file in 0..8 {
                match Square::from_coords(file, rank).and_then(|s| self.0.piece_at(s)) {
                    Some(p) => write!(f, " {} |", p)?,
                    None => write!(f, "   |")?,
                }
            }

            writeln!(f, " {}", rank + 1)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "     a   b   c   d   e   f   g   h")
    }
}
