use super::Color;
use derive_more::Display;

/// One of the possible outcomes of a refereed chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    #[display(fmt = "checkmate by the {} player", _0)]
    Checkmate(Color),

    #[display(fmt = "stalemate")]
    Stalemate,

    #[display(fmt = "draw by insufficient material")]
    DrawByInsufficientMaterial,

    #[display(fmt = "draw by the fifty-move rule")]
    DrawByFiftyMoveRule,

    #[display(fmt = "draw by threefold repetition")]
    DrawByThreefoldRepetition,

    #[display(fmt = "the {} player failed too many times in a row", _0)]
    FailureExhausted(Color),

    #[display(fmt = "unknown")]
    Unknown,
}

impl Outcome {
    /// Whether the outcome is a [draw] and neither side has won.
    ///
    /// [draw]: https://www.chessprogramming.org/Draw
    pub fn is_draw(&self) -> bool {
        use Outcome::*;
        matches!(
            self,
            Stalemate
                | DrawByInsufficientMaterial
                | DrawByFiftyMoveRule
                | DrawByThreefoldRepetition
        )
    }

    /// Whether the outcome is decisive and one of the sides has won.
    pub fn is_decisive(&self) -> bool {
        self.winner().is_some()
    }

    /// The winning side, if the outcome is [decisive](`Self::is_decisive`).
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            Outcome::FailureExhausted(c) => Some(!c),
            _ => None,
        }
    }

    /// The game termination marker, as used in the PGN `Result` tag.
    pub fn result(&self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None if self.is_draw() => "1/2-1/2",
            None => "*",
        }
    }
}
