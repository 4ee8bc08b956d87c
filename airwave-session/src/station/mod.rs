mod station;
mod station_behavior;
mod station_command;
mod station_context;

pub use station::*;
pub use station_behavior::*;
pub use station_command::*;
pub use station_context::*;
