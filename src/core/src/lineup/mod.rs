mod scorer;

pub use scorer::*;
