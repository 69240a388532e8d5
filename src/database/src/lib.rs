pub mod error;
pub mod event_log;
pub mod generators;
pub mod store;

pub use error::*;
pub use event_log::*;
pub use generators::*;
pub use store::*;
