mod completer;
mod editor;

pub use completer::ShellHelper;
pub use editor::RustylineReader;

use crate::error::ShellError;

/// Line input and history, as seen by the shell loop.
pub trait LineReader {
    /// Blocks for one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;

    fn add_history(&mut self, line: &str);

    /// Every remembered line, oldest first.
    fn history(&self) -> Vec<String>;

    /// Number shown next to the oldest history line.
    fn history_base(&self) -> usize {
        1
    }

    fn clear_history(&mut self);
}

/// `<n>: <line>` rows for the `history` builtin.
pub fn history_lines(reader: &dyn LineReader) -> impl Iterator<Item = String> {
    let base = reader.history_base();
    reader
        .history()
        .into_iter()
        .enumerate()
        .map(move |(i, line)| format!("{}: {}", i + base, line))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Feeds canned lines to the shell and keeps history in memory.
    #[derive(Default)]
    pub(crate) struct ScriptedReader {
        pub lines: VecDeque<String>,
        pub history: Vec<String>,
        pub prompts: Vec<String>,
        /// Return an I/O error instead of end-of-input once `lines` runs out.
        pub fail_when_empty: bool,
    }

    impl ScriptedReader {
        pub fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl LineReader for ScriptedReader {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
            self.prompts.push(prompt.to_string());
            match self.lines.pop_front() {
                None if self.fail_when_empty => Err(ShellError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "input device gone",
                ))),
                line => Ok(line),
            }
        }

        fn add_history(&mut self, line: &str) {
            self.history.push(line.to_string());
        }

        fn history(&self) -> Vec<String> {
            self.history.clone()
        }

        fn clear_history(&mut self) {
            self.history.clear();
        }
    }

    #[test]
    fn test_history_lines_are_numbered_from_base() {
        let mut reader = ScriptedReader::default();
        reader.add_history("ls");
        reader.add_history("cd /tmp");

        let lines: Vec<String> = history_lines(&reader).collect();
        assert_eq!(lines, vec!["1: ls", "2: cd /tmp"]);
    }
}
