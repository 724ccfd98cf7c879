use super::Role;
use derive_more::{Display, Error};
use shakmaty as sm;
use std::{convert::TryFrom, str::FromStr};

/// A promotion specifier.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Promotion {
    #[default]
    #[display(fmt = "")]
    None,
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
}

/// The reason why parsing [`Promotion`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "`{}` is not one of the promotion letters `n`, `b`, `r` or `q`", _0)]
pub struct ParsePromotionError(#[error(not(source))] pub String);

impl FromStr for Promotion {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Promotion::None),
            "n" => Ok(Promotion::Knight),
            "b" => Ok(Promotion::Bishop),
            "r" => Ok(Promotion::Rook),
            "q" => Ok(Promotion::Queen),
            _ => Err(ParsePromotionError(s.into())),
        }
    }
}

impl From<Promotion> for Option<Role> {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::None => None,
            Promotion::Knight => Some(Role::Knight),
            Promotion::Bishop => Some(Role::Bishop),
            Promotion::Rook => Some(Role::Rook),
            Promotion::Queen => Some(Role::Queen),
        }
    }
}

/// The reason why a [`Role`] cannot be promoted to.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "pawns cannot be promoted to `{}`", _0)]
pub struct InvalidPromotion(#[error(not(source))] pub Role);

#[doc(hidden)]
impl TryFrom<Option<sm::Role>> for Promotion {
    type Error = InvalidPromotion;

    fn try_from(r: Option<sm::Role>) -> Result<Self, Self::Error> {
        match r {
            None => Ok(Promotion::None),
            Some(sm::Role::Knight) => Ok(Promotion::Knight),
            Some(sm::Role::Bishop) => Ok(Promotion::Bishop),
            Some(sm::Role::Rook) => Ok(Promotion::Rook),
            Some(sm::Role::Queen) => Ok(Promotion::Queen),
            Some(r) => Err(InvalidPromotion(r.into())),
        }
    }
}

#[doc(hidden)]
impl From<Promotion> for Option<sm::Role> {
    fn from(p: Promotion) -> Self {
        Option::<Role>::from(p).map(sm::Role::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_promotion_is_an_identity(p: Promotion) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }

    #[proptest]
    fn parsing_promotion_fails_except_for_one_of_four_letters(
        #[filter(!["", "n", "b", "r", "q"].contains(&#s.as_str()))] s: String,
    ) {
        assert_eq!(s.parse::<Promotion>(), Err(ParsePromotionError(s)));
    }

    #[proptest]
    fn promotion_has_an_equivalent_shakmaty_representation(p: Promotion) {
        assert_eq!(Promotion::try_from(Option::<sm::Role>::from(p)), Ok(p));
    }

    #[test]
    fn neither_pawns_nor_kings_are_promotions() {
        assert_eq!(
            Promotion::try_from(Some(sm::Role::Pawn)),
            Err(InvalidPromotion(Role::Pawn))
        );

        assert_eq!(
            Promotion::try_from(Some(sm::Role::King)),
            Err(InvalidPromotion(Role::King))
        );
    }
}
