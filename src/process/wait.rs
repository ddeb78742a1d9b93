use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use tracing::debug;

use super::{Pid, ProcessError};
use crate::jobs::{ExitPoller, PollStatus};

/// How a foreground child gave the terminal back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForegroundStatus {
    Exited(i32),
    Signaled(Signal),
    Stopped(Signal),
}

impl ForegroundStatus {
    fn from_wait(status: WaitStatus) -> Option<Self> {
        match status {
            WaitStatus::Exited(_, code) => Some(ForegroundStatus::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => Some(ForegroundStatus::Signaled(signal)),
            WaitStatus::Stopped(_, signal) => Some(ForegroundStatus::Stopped(signal)),
            _ => None,
        }
    }
}

/// Blocks until `pid` exits, is killed, or stops.
pub fn wait_foreground(pid: Pid) -> Result<ForegroundStatus, ProcessError> {
    loop {
        match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
            Ok(status) => {
                if let Some(status) = ForegroundStatus::from_wait(status) {
                    return Ok(status);
                }
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ProcessError::Wait(e)),
        }
    }
}

/// Checks children with `waitpid(WNOHANG)`, reaping any that have exited.
#[derive(Debug, Default, Clone, Copy)]
pub struct WaitPoller;

impl ExitPoller for WaitPoller {
    fn poll(&mut self, pid: Pid) -> PollStatus {
        match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => PollStatus::Exited,
            Ok(_) => PollStatus::Running,
            // Someone else already reaped it; it is not coming back.
            Err(Errno::ECHILD) => {
                debug!(%pid, "child already reaped");
                PollStatus::Exited
            }
            Err(e) => {
                debug!(%pid, error = %e, "waitpid");
                PollStatus::Running
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::unistd::getpid;

    #[test]
    fn test_status_decoding() {
        let pid = Pid::from_raw(42);
        assert_eq!(
            ForegroundStatus::from_wait(WaitStatus::Exited(pid, 3)),
            Some(ForegroundStatus::Exited(3))
        );
        assert_eq!(
            ForegroundStatus::from_wait(WaitStatus::Signaled(pid, Signal::SIGKILL, false)),
            Some(ForegroundStatus::Signaled(Signal::SIGKILL))
        );
        // Stopped by SIGTSTP: 0x7f in the low byte of the raw status word.
        let stopped = WaitStatus::from_raw(pid, (libc::SIGTSTP << 8) | 0x7f).unwrap();
        assert_eq!(
            ForegroundStatus::from_wait(stopped),
            Some(ForegroundStatus::Stopped(Signal::SIGTSTP))
        );
        assert_eq!(ForegroundStatus::from_wait(WaitStatus::Continued(pid)), None);
    }

    #[test]
    fn test_poll_unknown_child() {
        let mut poller = WaitPoller;
        // Our own pid is never our child.
        assert_eq!(poller.poll(getpid()), PollStatus::Exited);
    }
}
