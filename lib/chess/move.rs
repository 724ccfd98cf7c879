use super::{InvalidPromotion, ParsePromotionError, ParseSquareError, Promotion, Square};
use derive_more::{Constructor, Display, Error, From};
use shakmaty as sm;
use std::{convert::TryFrom, str::FromStr};

/// A chess move in [pure coordinate notation].
///
/// A [`Move`] is only ever syntactically valid, whether it is legal depends on the position.
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[cfg_attr(test, filter(#self.0 != #self.1))]
#[display(fmt = "{}{}{}", _0, _1, _2)]
pub struct Move(Square, Square, Promotion);

impl Move {
    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        self.1
    }

    /// The [`Promotion`] specifier.
    pub fn promotion(&self) -> Promotion {
        self.2
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "expected 4 or 5 characters, got {}", _0)]
    #[from(ignore)]
    InvalidLength(#[error(not(source))] usize),

    #[display(fmt = "expected only ascii characters")]
    #[from(ignore)]
    NotAscii,

    #[display(fmt = "invalid square")]
    InvalidSquare(ParseSquareError),

    #[display(fmt = "invalid promotion")]
    InvalidPromotion(ParsePromotionError),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().count() {
            4 | 5 if !s.is_ascii() => Err(ParseMoveError::NotAscii),
            4 | 5 => Ok(Move(s[..2].parse()?, s[2..4].parse()?, s[4..].parse()?)),
            n => Err(ParseMoveError::InvalidLength(n)),
        }
    }
}

#[doc(hidden)]
impl From<Move> for sm::uci::Uci {
    fn from(m: Move) -> Self {
        sm::uci::Uci::Normal {
            from: m.whence().into(),
            to: m.whither().into(),
            promotion: m.promotion().into(),
        }
    }
}

/// The reason why a [`sm::uci::Uci`] has no equivalent [`Move`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum UnrepresentableMove {
    #[display(fmt = "null moves and drops are not supported")]
    #[from(ignore)]
    Unsupported,

    #[display(fmt = "invalid promotion")]
    InvalidPromotion(InvalidPromotion),
}

#[doc(hidden)]
impl TryFrom<sm::uci::Uci> for Move {
    type Error = UnrepresentableMove;

    fn try_from(m: sm::uci::Uci) -> Result<Self, Self::Error> {
        match m {
            sm::uci::Uci::Normal {
                from,
                to,
                promotion,
            } => Ok(Move(from.into(), to.into(), promotion.try_into()?)),

            _ => Err(UnrepresentableMove::Unsupported),
        }
    }
}
