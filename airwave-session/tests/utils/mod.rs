pub mod recording;
pub mod signal_helpers;

pub use loopback::*;
pub use mock_signaling::*;
pub use recording::*;
pub use signal_helpers::*;
