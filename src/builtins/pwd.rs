use std::env;
use std::io::Write;
use std::path::PathBuf;

use super::{Command, CommandContext, CommandError, Flow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError> {
        let cwd = env::current_dir().map_err(|source| CommandError::Directory {
            path: PathBuf::from("."),
            source,
        })?;
        writeln!(ctx.out, "{}", cwd.display())?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use crate::builtins::tests::run;
    use crate::input::tests::ScriptedReader;
    use crate::jobs::JobTable;

    #[test]
    fn test_pwd_prints_absolute_path() {
        let mut jobs = JobTable::new(1);
        let (result, out) = run("pwd", &mut jobs, &ScriptedReader::default());

        assert!(result.unwrap().is_ok());
        let printed = out.trim_end();
        assert!(printed.starts_with('/'));
        assert_eq!(out.lines().count(), 1);
    }
}
