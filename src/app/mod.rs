pub mod console;
pub mod reply;

pub use console::{Command, ConsoleTransport, DinnerReply};
