mod signaling_output;

pub use signaling_output::SignalingOutput;
