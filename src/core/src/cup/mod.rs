pub mod bracket;

pub use bracket::*;
