use super::Fault;
use crate::chess::{Color, Move, Position};
use crate::rules::Rules;

/// Checks that `token` is a legal move for `side` in `pos`.
///
/// The legal moves are only consulted if `token` is a well formed move,
/// surrounding whitespace notwithstanding.
pub fn validate<R: Rules + ?Sized>(
    rules: &R,
    pos: &Position,
    side: Color,
    token: &str,
) -> Result<Move, Fault> {
    if pos.turn() != side {
        return Err(Fault::WrongSide(side));
    }

    let token = token.trim();
    let m: Move = token.parse().map_err(|reason| Fault::MalformedMove {
        token: token.into(),
        reason,
    })?;

    if rules.legal_moves(pos).contains(&m) {
        Ok(m)
    } else {
        Err(Fault::IllegalMove(m))
    }
}
