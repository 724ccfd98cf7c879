use derive_more::{Display, Error};
use shakmaty as sm;
use std::str::FromStr;

/// Denotes a square of the chess board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", _0)]
pub struct Square(
    #[cfg_attr(test, strategy(proptest::prelude::Strategy::prop_map(0u32..64, sm::Square::new)))]
    sm::Square,
);

impl Square {
    /// The square at the intersection of a file and a rank, both counted from zero.
    pub fn from_coords(file: u32, rank: u32) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(sm::Square::from_coords(
                sm::File::new(file),
                sm::Rank::new(rank),
            )))
        } else {
            None
        }
    }

    /// This square's file, counted from zero.
    pub fn file(&self) -> u32 {
        self.0.file() as u32
    }

    /// This square's rank, counted from zero.
    pub fn rank(&self) -> u32 {
        self.0.rank() as u32
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "`{}` is not a square between `a1` and `h8`", _0)]
pub struct ParseSquareError(#[error(not(source))] pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => {
                Square::from_coords((f - b'a').into(), (r - b'1').into())
                    .ok_or_else(|| ParseSquareError(s.into()))
            }

            _ => Err(ParseSquareError(s.into())),
        }
    }
}

#[doc(hidden)]
impl From<sm::Square> for Square {
    fn from(s: sm::Square) -> Self {
        Square(s)
    }
}

#[doc(hidden)]
impl From<Square> for sm::Square {
    fn from(s: Square) -> Self {
        s.0
    }
}
