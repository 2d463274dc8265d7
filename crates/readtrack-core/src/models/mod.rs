pub mod book;
pub mod library;
pub mod stats;

pub use book::*;
pub use library::*;
pub use stats::*;
