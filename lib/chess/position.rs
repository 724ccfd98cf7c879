use super::{Color, Piece, Square};
use derive_more::{DebugCustom, Display, Error, From};
use shakmaty as sm;
use std::{num::NonZeroU32, str::FromStr};

/// A type representing a [`Position`]'s [zobrist hash].
///
/// [zobrist hash]: https://www.chessprogramming.org/Zobrist_Hashing
pub type Zobrist = u64;

/// An immutable snapshot of the chess board.
///
/// This type guarantees that it only holds valid positions,
/// and it always prints as [FEN] that parses back to the same position.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
#[derive(DebugCustom, Display, Default, Clone, Eq, PartialEq)]
#[debug(fmt = "Position({})", self)]
#[display(
    fmt = "{}",
    "sm::fen::Fen::from_position(self.0.clone(), sm::EnPassantMode::Legal)"
)]
pub struct Position(sm::Chess);

impl Position {
    /// The side to move.
    pub fn turn(&self) -> Color {
        sm::Position::turn(&self.0).into()
    }

    /// The number of halfmoves since the last capture or pawn advance.
    ///
    /// It resets to 0 whenever a piece is captured or a pawn is moved.
    pub fn halfmoves(&self) -> u32 {
        sm::Position::halfmoves(&self.0)
    }

    /// The current move number since the start of the game.
    ///
    /// It starts at 1, and is incremented after every move by black.
    pub fn fullmoves(&self) -> NonZeroU32 {
        sm::Position::fullmoves(&self.0)
    }

    /// The [en passant] square, if a pawn can actually be captured en passant.
    ///
    /// [en passant]: https://www.chessprogramming.org/En_passant
    pub fn en_passant_square(&self) -> Option<Square> {
        sm::Position::ep_square(&self.0, sm::EnPassantMode::Legal).map(Square::from)
    }

    /// This position's [zobrist hash].
    ///
    /// Positions that only differ by their move counters share the same hash.
    ///
    /// [zobrist hash]: https://www.chessprogramming.org/Zobrist_Hashing
    pub fn zobrist(&self) -> Zobrist {
        let z: sm::zobrist::Zobrist64 =
            sm::zobrist::ZobristHash::zobrist_hash(&self.0, sm::EnPassantMode::Legal);
        z.0
    }

    /// The [`Piece`] at a given [`Square`], if any.
    pub fn piece_at(&self, s: Square) -> Option<Piece> {
        sm::Position::board(&self.0)
            .piece_at(s.into())
            .map(Piece::from)
    }
}

/// The reason why the string is not valid FEN.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum InvalidFen {
    #[display(fmt = "syntax error at the piece placement field")]
    InvalidPlacement,
    #[display(fmt = "syntax error at the side to move field")]
    InvalidTurn,
    #[display(fmt = "syntax error at the castling rights field")]
    InvalidCastlingRights,
    #[display(fmt = "syntax error at the en passant square field")]
    InvalidEnPassantSquare,
    #[display(fmt = "syntax error at the halfmove clock field")]
    InvalidHalfmoveClock,
    #[display(fmt = "syntax error at the fullmove counter field")]
    InvalidFullmoves,
    #[display(fmt = "unspecified syntax error")]
    InvalidSyntax,
}

#[doc(hidden)]
impl From<sm::fen::ParseFenError> for InvalidFen {
    fn from(e: sm::fen::ParseFenError) -> Self {
        use InvalidFen::*;
        match e {
            sm::fen::ParseFenError::InvalidBoard => InvalidPlacement,
            sm::fen::ParseFenError::InvalidTurn => InvalidTurn,
            sm::fen::ParseFenError::InvalidCastling => InvalidCastlingRights,
            sm::fen::ParseFenError::InvalidEpSquare => InvalidEnPassantSquare,
            sm::fen::ParseFenError::InvalidHalfmoveClock => InvalidHalfmoveClock,
            sm::fen::ParseFenError::InvalidFullmoves => InvalidFullmoves,
            _ => InvalidSyntax,
        }
    }
}

/// The reason why the position represented by the FEN string is illegal.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum IllegalPosition {
    #[display(fmt = "at least one side has no king")]
    MissingKing,
    #[display(fmt = "at least one side has multiple kings")]
    TooManyKings,
    #[display(fmt = "there are pawns on the back-rank")]
    PawnsOnBackRank,
    #[display(fmt = "the player in check is not to move")]
    OppositeCheck,
    #[display(fmt = "invalid en passant square; wrong rank, occupied, or missing pushed pawn")]
    InvalidEnPassantSquare,
    #[display(fmt = "invalid castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "no sequence of legal moves can reach this position")]
    Other,
}

#[doc(hidden)]
impl From<sm::PositionError<sm::Chess>> for IllegalPosition {
    fn from(e: sm::PositionError<sm::Chess>) -> Self {
        let kinds = e.kinds();

        if kinds.contains(sm::PositionErrorKinds::MISSING_KING) {
            IllegalPosition::MissingKing
        } else if kinds.contains(sm::PositionErrorKinds::TOO_MANY_KINGS) {
            IllegalPosition::TooManyKings
        } else if kinds.contains(sm::PositionErrorKinds::PAWNS_ON_BACKRANK) {
            IllegalPosition::PawnsOnBackRank
        } else if kinds.contains(sm::PositionErrorKinds::OPPOSITE_CHECK) {
            IllegalPosition::OppositeCheck
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_EP_SQUARE) {
            IllegalPosition::InvalidEnPassantSquare
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_CASTLING_RIGHTS) {
            IllegalPosition::InvalidCastlingRights
        } else {
            IllegalPosition::Other
        }
    }
}

/// The reason why parsing a [`Position`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    #[display(fmt = "failed to parse FEN")]
    InvalidFen(InvalidFen),

    #[display(fmt = "illegal position")]
    IllegalPosition(IllegalPosition),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fen: sm::fen::Fen = s.trim().parse().map_err(InvalidFen::from)?;
        let chess: sm::Chess = fen
            .into_position(sm::CastlingMode::Standard)
            .map_err(IllegalPosition::from)?;

        Ok(Position(chess))
    }
}

#[doc(hidden)]
impl From<sm::Chess> for Position {
    fn from(chess: sm::Chess) -> Self {
        Position(chess)
    }
}

#[doc(hidden)]
impl AsRef<sm::Chess> for Position {
    fn as_ref(&self) -> &sm::Chess {
        &self.0
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Position {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{prelude::*, sample::Selector};

        (0..256usize, any::<Selector>())
            .prop_map(|(plies, selector)| {
                let mut chess = sm::Chess::default();
                for _ in 0..plies {
                    match selector.try_select(sm::Position::legal_moves(&chess)) {
                        Some(m) => sm::Position::play_unchecked(&mut chess, &m),
                        None => break,
                    }
                }

                Position(chess)
            })
            .no_shrink()
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Role;
    use test_strategy::proptest;

    #[test]
    fn default_position_is_the_initial_position() {
        let pos = Position::default();
        assert_eq!(
            pos.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );

        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.halfmoves(), 0);
        assert_eq!(pos.fullmoves().get(), 1);
        assert_eq!(pos.en_passant_square(), None);
    }

    #[proptest]
    fn all_positions_can_be_represented_using_fen_notation(pos: Position) {
        assert_eq!(pos.to_string().parse(), Ok(pos));
    }

    #[proptest]
    fn turn_returns_the_current_side_to_play(pos: Position) {
        let setup = sm::Position::into_setup(pos.0.clone(), sm::EnPassantMode::Legal);
        assert_eq!(pos.turn(), setup.turn.into());
    }

    #[proptest]
    fn halfmoves_returns_the_number_of_halfmoves_since_last_irreversible_move(pos: Position) {
        let setup = sm::Position::into_setup(pos.0.clone(), sm::EnPassantMode::Legal);
        assert_eq!(pos.halfmoves(), setup.halfmoves);
    }

    #[proptest]
    fn zobrist_ignores_move_counters(pos: Position) {
        let fields: Vec<_> = pos.to_string().split(' ').map(String::from).collect();
        let reset = format!("{} 0 1", fields[..4].join(" "));
        assert_eq!(reset.parse::<Position>()?.zobrist(), pos.zobrist());
    }

    #[proptest]
    fn piece_at_agrees_with_the_board(pos: Position, s: Square) {
        assert_eq!(
            pos.piece_at(s),
            sm::Position::board(&pos.0)
                .piece_at(s.into())
                .map(Into::into)
        );
    }

    #[test]
    fn piece_at_finds_pieces_on_the_initial_position() {
        let pos = Position::default();
        assert_eq!(
            pos.piece_at("e1".parse().unwrap()),
            Some(Piece(Color::White, Role::King))
        );

        assert_eq!(
            pos.piece_at("d8".parse().unwrap()),
            Some(Piece(Color::Black, Role::Queen))
        );

        assert_eq!(pos.piece_at("e4".parse().unwrap()), None);
    }

    #[test]
    fn parsing_fails_for_malformed_fen() {
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Position>(),
            Err(InvalidFen::InvalidTurn.into())
        );
    }

    #[test]
    fn parsing_fails_for_illegal_positions() {
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1".parse::<Position>(),
            Err(IllegalPosition::MissingKing.into())
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let fen = " rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n";
        assert_eq!(fen.parse(), Ok(Position::default()));
    }
}
