mod receiver;
mod receiver_behavior;
mod receiver_command;

pub use receiver::*;
pub use receiver_behavior::*;
pub use receiver_command::*;
