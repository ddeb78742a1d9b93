use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

mod cd;
mod exit;
mod history;
mod jobs;
mod ls;
mod pwd;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use history::HistoryCommand;
pub use jobs::JobsCommand;
pub use ls::LsCommand;
pub use pwd::PwdCommand;

use crate::input::LineReader;
use crate::jobs::JobTable;

/// Names handled inside the shell, in lookup order.
pub const BUILTIN_NAMES: [&str; 6] = ["exit", "cd", "history", "pwd", "ls", "jobs"];

#[derive(Debug)]
pub enum CommandError {
    Directory { path: PathBuf, source: io::Error },
    HomeDirNotFound,
    Io(io::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Directory { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            CommandError::HomeDirNotFound => write!(f, "home directory not found"),
            CommandError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Directory { source, .. } => Some(source),
            CommandError::Io(e) => Some(e),
            CommandError::HomeDirNotFound => None,
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Io(err)
    }
}

/// What the shell loop should do after a builtin ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Shell state a builtin may read or change.
pub struct CommandContext<'a> {
    pub jobs: &'a mut JobTable,
    pub history: &'a dyn LineReader,
    pub out: &'a mut dyn Write,
}

pub trait Command {
    /// `args` excludes the command name.
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit(ExitCommand),
    Cd(CdCommand),
    History(HistoryCommand),
    Pwd(PwdCommand),
    Ls(LsCommand),
    Jobs(JobsCommand),
}

impl Builtin {
    /// Finds the builtin for `argv`, if any. Names must match exactly;
    /// `ls` only counts when it has no arguments.
    pub fn resolve(argv: &[String]) -> Option<Builtin> {
        let (name, rest) = argv.split_first()?;
        match name.as_str() {
            "exit" => Some(Builtin::Exit(ExitCommand)),
            "cd" => Some(Builtin::Cd(CdCommand)),
            "history" => Some(Builtin::History(HistoryCommand)),
            "pwd" => Some(Builtin::Pwd(PwdCommand)),
            "ls" if rest.is_empty() => Some(Builtin::Ls(LsCommand)),
            "jobs" => Some(Builtin::Jobs(JobsCommand)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Exit(_) => "exit",
            Builtin::Cd(_) => "cd",
            Builtin::History(_) => "history",
            Builtin::Pwd(_) => "pwd",
            Builtin::Ls(_) => "ls",
            Builtin::Jobs(_) => "jobs",
        }
    }
}

impl Command for Builtin {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError> {
        match self {
            Builtin::Exit(cmd) => cmd.execute(args, ctx),
            Builtin::Cd(cmd) => cmd.execute(args, ctx),
            Builtin::History(cmd) => cmd.execute(args, ctx),
            Builtin::Pwd(cmd) => cmd.execute(args, ctx),
            Builtin::Ls(cmd) => cmd.execute(args, ctx),
            Builtin::Jobs(cmd) => cmd.execute(args, ctx),
        }
    }
}

/// Runs `argv` as a builtin. `None` means it is not one and should be
/// launched as an external command.
pub fn dispatch(argv: &[String], ctx: &mut CommandContext<'_>) -> Option<Result<Flow, CommandError>> {
    let builtin = Builtin::resolve(argv)?;
    tracing::debug!(builtin = builtin.name(), "running builtin");
    Some(builtin.execute(&argv[1..], ctx))
}
