use crate::chess::{Move, Outcome, ParsePositionError, Position, San};
use derive_more::{Display, Error};

mod standard;

pub use standard::*;

/// The reason why a [`Move`] could not be applied to a [`Position`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{}` is illegal in this position", _0)]
pub struct IllegalMove(#[error(not(source))] pub Move);

/// Trait for types that implement the rules of chess.
///
/// Implementations are stateless oracles, every query takes the [`Position`] it concerns.
#[cfg_attr(test, mockall::automock)]
pub trait Rules {
    /// Parses a position from its [FEN] descriptor.
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    fn parse(&self, fen: &str) -> Result<Position, ParsePositionError>;

    /// The legal moves in this position.
    fn legal_moves(&self, pos: &Position) -> Vec<Move>;

    /// Plays a move, returning the resulting position and the move in SAN.
    fn apply(&self, pos: &Position, m: Move) -> Result<(Position, San), IllegalMove>;

    /// The [`Outcome`] of the game if `pos` is terminal.
    ///
    /// `repetitions` is the number of times `pos` has occurred in the game, including now.
    fn outcome(&self, pos: &Position, repetitions: usize) -> Option<Outcome>;
}
