use std::io;

use libc::{sighandler_t, SIG_DFL, SIG_IGN};
use signal_hook::consts::signal::{SIGINT, SIGQUIT, SIGTSTP, SIGTTIN, SIGTTOU};

/// Signals the terminal driver sends to the foreground group on behalf of
/// the user (Ctrl-C, Ctrl-\, Ctrl-Z) plus background read/write stops.
pub const JOB_CONTROL_SIGNALS: [libc::c_int; 5] = [SIGINT, SIGQUIT, SIGTSTP, SIGTTIN, SIGTTOU];

/// Who the job-control signals are meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The shell holds the terminal: all job-control signals are ignored.
    ShellOwnsTerminal,
    /// A child is about to exec: default OS behaviour is restored.
    ChildOwnsTerminal,
}

impl Disposition {
    fn handler(self) -> sighandler_t {
        match self {
            Disposition::ShellOwnsTerminal => SIG_IGN,
            Disposition::ChildOwnsTerminal => SIG_DFL,
        }
    }

    /// Installs this profile for every job-control signal.
    ///
    /// Safe to call between `fork` and `exec`: it only calls `signal(2)`.
    pub fn apply(self) -> io::Result<()> {
        let handler = self.handler();
        for sig in JOB_CONTROL_SIGNALS {
            // SAFETY: SIG_IGN and SIG_DFL are valid dispositions for these signals.
            if unsafe { libc::signal(sig, handler) } == libc::SIG_ERR {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    /// Reports whether every job-control signal currently has this profile.
    pub fn is_installed(self) -> io::Result<bool> {
        let expected = self.handler();
        for sig in JOB_CONTROL_SIGNALS {
            if current_handler(sig)? != expected {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Names of the job-control signals, for log output.
pub fn signal_names() -> Vec<&'static str> {
    JOB_CONTROL_SIGNALS
        .iter()
        .filter_map(|&sig| signal_hook::low_level::signal_name(sig))
        .collect()
}

fn current_handler(sig: libc::c_int) -> io::Result<sighandler_t> {
    // SAFETY: a null `act` only queries the disposition into `old`.
    unsafe {
        let mut old: libc::sigaction = std::mem::zeroed();
        if libc::sigaction(sig, std::ptr::null(), &mut old) == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(old.sa_sigaction)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    static DISPOSITION_LOCK: Mutex<()> = Mutex::new(());

    /// Serialises tests that change signal dispositions or the terminal owner.
    pub(crate) fn lock() -> MutexGuard<'static, ()> {
        DISPOSITION_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_profiles_round_trip() {
        let _guard = lock();
        Disposition::ShellOwnsTerminal.apply().unwrap();
        assert!(Disposition::ShellOwnsTerminal.is_installed().unwrap());
        assert!(!Disposition::ChildOwnsTerminal.is_installed().unwrap());

        Disposition::ChildOwnsTerminal.apply().unwrap();
        assert!(Disposition::ChildOwnsTerminal.is_installed().unwrap());
    }

    #[test]
    fn test_signal_names() {
        assert_eq!(
            signal_names(),
            vec!["SIGINT", "SIGQUIT", "SIGTSTP", "SIGTTIN", "SIGTTOU"]
        );
    }
}
