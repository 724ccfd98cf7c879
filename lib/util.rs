mod build;
mod io;

pub use build::*;
pub use io::*;
