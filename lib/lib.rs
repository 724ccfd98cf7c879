/// Chess domain types.
pub mod chess;
/// Sources of moves for either side of the board.
pub mod provider;
/// The game loop that arbitrates between two providers.
pub mod referee;
/// The rules of chess.
pub mod rules;
/// Observers of a game in progress.
pub mod spectator;
/// Assorted utilities.
pub mod util;
