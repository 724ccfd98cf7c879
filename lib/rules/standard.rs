use super::{IllegalMove, Rules};
use crate::chess::{Move, Outcome, ParsePositionError, Position, San};
use shakmaty as sm;

/// The standard rules of chess, as implemented by [shakmaty].
///
/// [shakmaty]: https://docs.rs/shakmaty
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Standard;

impl Rules for Standard {
    fn parse(&self, fen: &str) -> Result<Position, ParsePositionError> {
        fen.parse()
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        sm::Position::legal_moves(pos.as_ref())
            .iter()
            .filter_map(|m| m.to_uci(sm::CastlingMode::Standard).try_into().ok())
            .collect()
    }

    fn apply(&self, pos: &Position, m: Move) -> Result<(Position, San), IllegalMove> {
        let mut chess = pos.as_ref().clone();
        let uci = sm::uci::Uci::from(m);
        let vm = uci.to_move(&chess).map_err(|_| IllegalMove(m))?;
        let san = sm::san::SanPlus::from_move_and_play_unchecked(&mut chess, &vm);
        Ok((chess.into(), san.into()))
    }

    fn outcome(&self, pos: &Position, repetitions: usize) -> Option<Outcome> {
        let chess = pos.as_ref();
        if sm::Position::is_checkmate(chess) {
            Some(Outcome::Checkmate(!pos.turn()))
        } else if sm::Position::is_stalemate(chess) {
            Some(Outcome::Stalemate)
        } else if sm::Position::is_insufficient_material(chess) {
            Some(Outcome::DrawByInsufficientMaterial)
        } else if pos.halfmoves() >= 100 {
            Some(Outcome::DrawByFiftyMoveRule)
        } else if repetitions >= 3 {
            Some(Outcome::DrawByThreefoldRepetition)
        } else {
            None
        }
    }
}
