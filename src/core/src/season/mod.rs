mod rollover;
mod season;
mod table;

pub use rollover::*;
pub use season::*;
pub use table::*;
