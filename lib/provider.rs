use crate::chess::Position;
use async_trait::async_trait;
use derive_more::{Display, Error, From};
use std::io;

mod config;
mod protocol;
mod random;
mod remote;
mod uci;

pub use config::*;
pub use protocol::*;
pub use random::*;
pub use remote::*;
pub use uci::*;

/// The reason why a [`Provider`] produced no move token.
#[derive(Debug, Display, Error, From)]
pub enum ProviderError {
    #[display(fmt = "the provider refused to move: {}", _0)]
    #[from(ignore)]
    Refused(#[error(not(source))] String),

    #[display(fmt = "the provider answered with an empty move")]
    #[from(ignore)]
    Empty,

    #[display(fmt = "the provider answered with an unintelligible message")]
    Protocol(serde_json::Error),

    #[display(fmt = "failed to communicate with the provider")]
    Io(io::Error),
}

/// Trait for sources of moves for one side of the board.
///
/// A provider answers with a raw move token, whose validity it is up to the caller to check.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Provider {
    /// Produce a move token for the side to move in `pos`.
    async fn play(&mut self, pos: &Position) -> Result<String, ProviderError>;
}
