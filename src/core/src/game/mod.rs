mod game;
mod log;
mod settings;
mod stage;

pub use game::*;
pub use log::*;
pub use settings::*;
pub use stage::*;
