mod scheduler;

pub use scheduler::*;
