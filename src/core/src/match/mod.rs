mod fixture;
mod resolver;
mod sim;

pub use fixture::*;
pub use resolver::*;
pub use sim::*;
