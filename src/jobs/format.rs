//! Text rows for job notices and the `jobs` listing.
//!
//! These are kept free of any process state so they can be checked without
//! spawning anything.

use crate::process::Pid;

/// `[<id>] Done <command>`
pub fn done_line(id: usize, command: &str) -> String {
    format!("[{}] Done {}", id, command)
}

/// `[<id>] <pid> Running <command>`
pub fn running_line(id: usize, pid: Pid, command: &str) -> String {
    format!("[{}] {} Running {}", id, pid, command)
}

/// `[<id>] <pid> <command>`, printed once when a background job starts.
pub fn registration_line(id: usize, pid: Pid, command: &str) -> String {
    format!("[{}] {} {}", id, pid, command)
}

/// Rebuilds the display text of a background invocation.
pub fn background_command(args: &[String]) -> String {
    let mut command = String::new();
    for arg in args {
        command.push_str(arg);
        command.push(' ');
    }
    command.push('&');
    command
}
