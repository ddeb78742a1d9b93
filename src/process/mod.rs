use std::fmt;

use nix::errno::Errno;

pub mod launcher;
pub mod signal;
pub mod terminal;
pub mod wait;

pub use launcher::{Launch, Launcher};
pub use nix::unistd::Pid;
pub use signal::Disposition;
pub use terminal::Terminal;
pub use wait::{ForegroundStatus, WaitPoller};

#[derive(Debug)]
pub enum ProcessError {
    Fork(Errno),
    Wait(Errno),
    EmptyCommand,
    InvalidArgument(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Fork(e) => write!(f, "fork failed: {}", e),
            ProcessError::Wait(e) => write!(f, "wait failed: {}", e),
            ProcessError::EmptyCommand => write!(f, "no command to run"),
            ProcessError::InvalidArgument(arg) => {
                write!(f, "argument contains a NUL byte: {:?}", arg)
            }
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Fork(e) | ProcessError::Wait(e) => Some(e),
            _ => None,
        }
    }
}
