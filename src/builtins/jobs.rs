use std::io::Write;

use super::{Command, CommandContext, CommandError, Flow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobsCommand;

impl Command for JobsCommand {
    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError> {
        for line in ctx.jobs.list() {
            writeln!(ctx.out, "{}", line)?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use crate::builtins::tests::run;
    use crate::input::tests::ScriptedReader;
    use crate::jobs::JobTable;
    use crate::process::Pid;

    #[test]
    fn test_jobs_lists_table() {
        let mut jobs = JobTable::new(4);
        jobs.add(Pid::from_raw(4242), "sleep 30 &", true).unwrap();
        jobs.add(Pid::from_raw(4243), "make &", true).unwrap();

        let (result, out) = run("jobs", &mut jobs, &ScriptedReader::default());
        assert!(result.unwrap().is_ok());
        assert_eq!(out, "[1] 4242 Running sleep 30 &\n[2] 4243 Running make &\n");
    }

    #[test]
    fn test_jobs_on_empty_table() {
        let mut jobs = JobTable::new(4);
        let (result, out) = run("jobs", &mut jobs, &ScriptedReader::default());
        assert!(result.unwrap().is_ok());
        assert!(out.is_empty());
    }
}
