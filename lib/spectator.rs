use crate::chess::Position;

mod terminal;

pub use terminal::*;

/// Trait for observers of a game in progress.
///
/// Spectators are fire-and-forget, they cannot interrupt the game.
#[cfg_attr(test, mockall::automock)]
pub trait Spectator {
    /// Show the current position.
    fn render(&mut self, pos: &Position);

    /// Release whatever resources are held, the game is over.
    fn teardown(&mut self);
}

/// A [`Spectator`] that ignores everything.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Silent;

impl Spectator for Silent {
    fn render(&mut self, _: &Position) {}

    fn teardown(&mut self) {}
}
