use std::io::Write;

use super::{Command, CommandContext, CommandError, Flow};
use crate::input::history_lines;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError> {
        for line in history_lines(ctx.history) {
            writeln!(ctx.out, "{}", line)?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use crate::builtins::tests::run;
    use crate::input::tests::ScriptedReader;
    use crate::input::LineReader;
    use crate::jobs::JobTable;

    #[test]
    fn test_history_output() {
        let mut reader = ScriptedReader::default();
        reader.add_history("ls -la");
        reader.add_history("  pwd  ");
        reader.add_history("history");

        let mut jobs = JobTable::new(1);
        let (result, out) = run("history", &mut jobs, &reader);
        assert!(result.unwrap().is_ok());
        assert_eq!(out, "1: ls -la\n2:   pwd  \n3: history\n");
    }
}
