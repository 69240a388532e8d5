mod player;
mod position;

pub use player::*;
pub use position::*;
