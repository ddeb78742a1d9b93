use std::ffi::CString;
use std::io::Write;
use std::os::fd::AsFd;

use nix::errno::Errno;
use nix::unistd::{fork, getpid, setpgid, tcsetpgrp, ForkResult};
use tracing::{debug, warn};

use super::signal::Disposition;
use super::terminal::Terminal;
use super::wait::{wait_foreground, ForegroundStatus};
use super::{Pid, ProcessError};
use crate::jobs::{format, JobId, JobTable};

/// What happened to a launched command once control returned to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    Foreground(ForegroundStatus),
    /// `job` is `None` when the table had no free slot and the child runs
    /// untracked.
    Background { job: Option<JobId>, pid: Pid },
}

/// Strips a trailing background marker from `args`.
///
/// A final `&` token is dropped; a final token ending in `&` loses that
/// character. Returns whether a marker was found.
pub fn detect_background(args: &mut Vec<String>) -> bool {
    let Some(last) = args.last_mut() else {
        return false;
    };
    if last.as_str() == "&" {
        args.pop();
        true
    } else if last.ends_with('&') {
        last.pop();
        true
    } else {
        false
    }
}

/// Runs external commands on behalf of the shell.
pub struct Launcher<'a> {
    terminal: &'a Terminal,
}

impl<'a> Launcher<'a> {
    pub fn new(terminal: &'a Terminal) -> Self {
        Self { terminal }
    }

    /// Forks and execs `args`, either waiting for it in the foreground or
    /// registering it in `jobs` when it ends with a background marker.
    ///
    /// Registration lines go to `out`.
    pub fn launch(
        &self,
        mut args: Vec<String>,
        jobs: &mut JobTable,
        out: &mut dyn Write,
    ) -> Result<Launch, ProcessError> {
        let background = detect_background(&mut args);
        if args.is_empty() || args[0].is_empty() {
            return Err(ProcessError::EmptyCommand);
        }
        let argv = to_c_strings(&args)?;

        let pid = self.fork_exec(&argv, background)?;
        debug!(%pid, background, command = %args[0], "forked");

        if background {
            Ok(self.register(pid, &args, jobs, out))
        } else {
            self.run_foreground(pid).map(Launch::Foreground)
        }
    }

    fn fork_exec(&self, argv: &[CString], background: bool) -> Result<Pid, ProcessError> {
        // Everything the child touches is allocated here, before fork: another
        // thread may hold the allocator lock at fork time.
        let mut ptrs: Vec<*const libc::c_char> = argv.iter().map(|arg| arg.as_ptr()).collect();
        ptrs.push(std::ptr::null());
        let failure_prefix = exec_failure_prefix(&argv[0]);
        let handoff = !background && self.terminal.is_interactive();
        let fd = self.terminal.as_fd();

        // SAFETY: the child makes only async-signal-safe calls before exec
        // or _exit and does not allocate.
        match unsafe { fork() }.map_err(ProcessError::Fork)? {
            ForkResult::Parent { child } => Ok(child),
            ForkResult::Child => {
                if !background {
                    let _ = setpgid(Pid::from_raw(0), Pid::from_raw(0));
                    if handoff {
                        let _ = tcsetpgrp(fd, getpid());
                    }
                }
                let _ = Disposition::ChildOwnsTerminal.apply();
                // nix's execvp builds its pointer array per call, so the
                // prepared one goes straight to libc.
                unsafe { libc::execvp(ptrs[0], ptrs.as_ptr()) };
                exec_failed(&failure_prefix, Errno::last())
            }
        }
    }

    fn run_foreground(&self, pid: Pid) -> Result<ForegroundStatus, ProcessError> {
        set_own_group(pid);
        if self.terminal.is_interactive() {
            if let Err(e) = self.terminal.set_foreground_group(pid) {
                debug!(%pid, error = %e, "could not hand the terminal to the child");
            }
        }

        let status = wait_foreground(pid);

        if let Err(e) = self.terminal.reclaim() {
            warn!(error = %e, "could not reclaim the terminal");
        }
        let status = status?;
        debug!(%pid, ?status, "foreground job returned");
        Ok(status)
    }

    fn register(&self, pid: Pid, args: &[String], jobs: &mut JobTable, out: &mut dyn Write) -> Launch {
        set_own_group(pid);
        let command = format::background_command(args);

        match jobs.add(pid, &command, true) {
            Ok(id) => {
                let line = format::registration_line(id, pid, &command);
                if let Err(e) = writeln!(out, "{}", line).and_then(|()| out.flush()) {
                    warn!(id, %pid, error = %e, "couldn't print the job registration");
                }
                Launch::Background { job: Some(id), pid }
            }
            Err(e) => {
                warn!(%pid, error = %e, "background job is not tracked");
                eprintln!("lash: {}, pid {} is not tracked", e, pid);
                Launch::Background { job: None, pid }
            }
        }
    }
}

/// Puts `pid` in a process group of its own. The child does the same on
/// its side; whichever runs second may see `EACCES` once exec has happened.
fn set_own_group(pid: Pid) {
    if let Err(e) = setpgid(pid, pid) {
        debug!(%pid, error = %e, "setpgid in parent");
    }
}

fn to_c_strings(args: &[String]) -> Result<Vec<CString>, ProcessError> {
    args.iter()
        .map(|arg| {
            CString::new(arg.as_bytes()).map_err(|_| ProcessError::InvalidArgument(arg.clone()))
        })
        .collect()
}

/// `lash: <command>: `, the start of the message a failed exec prints.
fn exec_failure_prefix(command: &CString) -> Vec<u8> {
    let mut prefix = b"lash: ".to_vec();
    prefix.extend_from_slice(command.as_bytes());
    prefix.extend_from_slice(b": ");
    prefix
}

fn exec_failure_reason(errno: Errno) -> &'static [u8] {
    match errno {
        Errno::ENOENT => b"command not found\n",
        Errno::EACCES => b"permission denied\n",
        Errno::ENOEXEC => b"exec format error\n",
        Errno::E2BIG => b"argument list too long\n",
        _ => b"cannot execute\n",
    }
}

/// Reports a failed exec on stderr and terminates the child.
///
/// Only raw `write(2)` and `_exit(2)`: no allocation and no stderr lock.
fn exec_failed(prefix: &[u8], errno: Errno) -> ! {
    let reason = exec_failure_reason(errno);
    // SAFETY: both buffers are valid for their lengths; write and _exit are
    // async-signal-safe.
    unsafe {
        libc::write(libc::STDERR_FILENO, prefix.as_ptr().cast(), prefix.len());
        libc::write(libc::STDERR_FILENO, reason.as_ptr().cast(), reason.len());
        libc::_exit(libc::EXIT_FAILURE)
    }
}
