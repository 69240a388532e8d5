mod real_team;
mod team;

pub use real_team::*;
pub use team::*;
