mod color;
mod r#move;
mod outcome;
mod piece;
mod position;
mod promotion;
mod record;
mod role;
mod san;
mod square;

pub use color::*;
pub use outcome::*;
pub use piece::*;
pub use position::*;
pub use promotion::*;
pub use r#move::*;
pub use record::*;
pub use role::*;
pub use san::*;
pub use square::*;
