mod multiplexer;

pub use multiplexer::*;
