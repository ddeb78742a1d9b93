use rustyline::{error::ReadlineError, history::DefaultHistory, Config, Editor};
use tracing::warn;

use super::{LineReader, ShellHelper};
use crate::error::ShellError;

/// Interactive line editor backed by rustyline.
pub struct RustylineReader {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl RustylineReader {
    pub fn new(history_limit: usize) -> Result<Self, ShellError> {
        let config = Config::builder()
            .max_history_size(history_limit)?
            .history_ignore_dups(false)?
            .auto_add_history(false)
            .build();
        let mut editor = Editor::<ShellHelper, DefaultHistory>::with_config(config)?;
        editor.set_helper(Some(ShellHelper::new()));

        Ok(Self { editor })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            // Ctrl-C while editing abandons the line, like an empty one.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            warn!(error = %e, "couldn't add to history");
        }
    }

    fn history(&self) -> Vec<String> {
        self.editor.history().iter().cloned().collect()
    }

    fn clear_history(&mut self) {
        if let Err(e) = self.editor.clear_history() {
            warn!(error = %e, "couldn't clear history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::history_lines;

    #[test]
    fn test_repeated_lines_are_all_kept() {
        let mut reader = RustylineReader::new(1000).unwrap();
        reader.add_history("pwd");
        reader.add_history("pwd");
        reader.add_history(" ls");

        let lines: Vec<String> = history_lines(&reader).collect();
        assert_eq!(lines, vec!["1: pwd", "2: pwd", "3:  ls"]);

        reader.clear_history();
        assert!(reader.history().is_empty());
    }
}
