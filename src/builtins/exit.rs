use super::{Command, CommandContext, CommandError, Flow};

/// Leaves the shell. The session tears itself down before the process ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], _ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}
