mod logging;
mod random;

pub use logging::*;
pub use random::*;
