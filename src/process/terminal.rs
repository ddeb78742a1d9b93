use std::io;
use std::os::fd::{AsFd, BorrowedFd, RawFd};

use nix::sys::signal::{killpg, Signal};
use nix::sys::termios::{tcgetattr, tcsetattr, SetArg, Termios};
use nix::unistd::{getpgrp, getpid, isatty, setpgid, tcgetpgrp, tcsetpgrp};
use tracing::debug;

use super::Pid;

/// The shell's controlling terminal and its process group bookkeeping.
///
/// Holds a raw descriptor it does not own; the caller keeps it open for the
/// lifetime of the value.
pub struct Terminal {
    fd: RawFd,
    interactive: bool,
    shell_pgid: Pid,
    saved_modes: Option<Termios>,
}

impl AsFd for Terminal {
    fn as_fd(&self) -> BorrowedFd<'_> {
        // SAFETY: `fd` stays open while the Terminal exists.
        unsafe { BorrowedFd::borrow_raw(self.fd) }
    }
}

impl Terminal {
    /// Wraps standard input, which is treated as the controlling terminal.
    pub fn stdin() -> Self {
        Self::from_fd(libc::STDIN_FILENO)
    }

    pub fn from_fd(fd: RawFd) -> Self {
        Self {
            fd,
            interactive: isatty(fd).unwrap_or(false),
            shell_pgid: getpgrp(),
            saved_modes: None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn shell_pgid(&self) -> Pid {
        self.shell_pgid
    }

    pub fn saved_modes(&self) -> Option<&Termios> {
        self.saved_modes.as_ref()
    }

    /// Waits until the shell is in the foreground, moves it into its own
    /// process group and makes that group the terminal's foreground group.
    ///
    /// Does nothing for a non-interactive shell.
    pub fn take_control(&mut self) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }

        loop {
            let pgrp = getpgrp();
            if self.foreground_group()? == pgrp {
                break;
            }
            debug!(%pgrp, "shell is in the background, stopping until resumed");
            killpg(pgrp, Signal::SIGTTIN)?;
        }

        let pid = getpid();
        if getpgrp() != pid {
            setpgid(pid, pid)?;
        }
        self.shell_pgid = pid;

        self.set_foreground_group(pid)?;
        self.saved_modes = Some(tcgetattr(self.as_fd())?);
        debug!(pgid = %pid, fd = self.fd, "shell owns the terminal");
        Ok(())
    }

    pub fn foreground_group(&self) -> io::Result<Pid> {
        Ok(tcgetpgrp(self.as_fd())?)
    }

    pub fn set_foreground_group(&self, pgid: Pid) -> io::Result<()> {
        Ok(tcsetpgrp(self.as_fd(), pgid)?)
    }

    /// Hands the terminal back to the shell's own group.
    pub fn reclaim(&self) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        self.set_foreground_group(self.shell_pgid)
    }

    /// Puts back the terminal attributes captured by [`take_control`].
    ///
    /// [`take_control`]: Terminal::take_control
    pub fn restore_modes(&self) -> io::Result<()> {
        match &self.saved_modes {
            Some(modes) => Ok(tcsetattr(self.as_fd(), SetArg::TCSADRAIN, modes)?),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_tty_is_not_interactive() {
        let file = tempfile::tempfile().unwrap();
        let fd = std::os::fd::AsRawFd::as_raw_fd(&file);
        let mut terminal = Terminal::from_fd(fd);

        assert!(!terminal.is_interactive());
        assert!(terminal.take_control().is_ok());
        assert!(terminal.saved_modes().is_none());
        assert!(terminal.reclaim().is_ok());
        assert!(terminal.restore_modes().is_ok());
    }

    #[test]
    fn test_shell_pgid_is_current_group() {
        let terminal = Terminal::stdin();
        assert_eq!(terminal.shell_pgid(), getpgrp());
    }
}
