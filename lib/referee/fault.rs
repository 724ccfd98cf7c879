use crate::chess::{Color, Move, ParseMoveError};
use crate::provider::ProviderError;
use derive_more::{Display, Error};
use std::time::Duration;

/// The reason why a single attempt at moving was rejected.
///
/// Faults are recoverable, the same side is asked again until it runs out of retries.
#[derive(Debug, Display, Error)]
pub enum Fault {
    #[display(fmt = "it is not the {} player's turn", _0)]
    WrongSide(#[error(not(source))] Color),

    #[display(fmt = "`{}` is not a move in pure coordinate notation", token)]
    MalformedMove {
        token: String,
        #[error(source)]
        reason: ParseMoveError,
    },

    #[display(fmt = "`{}` is not a legal move", _0)]
    IllegalMove(#[error(not(source))] Move),

    #[display(fmt = "the provider did not answer within {:?}", _0)]
    ProviderTimeout(#[error(not(source))] Duration),

    #[display(fmt = "the provider failed to answer")]
    ProviderTransport(ProviderError),
}
