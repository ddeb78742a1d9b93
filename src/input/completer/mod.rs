use std::borrow::Cow;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::highlight::SyntaxHighlighter;

mod command;
mod path;

use command::CommandCompleter;
use path::PathCompleter;

/// rustyline helper: completion for the command word and its arguments,
/// plus highlighting of the line being typed.
#[derive(Clone)]
pub struct ShellHelper {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl Default for ShellHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellHelper {
    pub fn new() -> Self {
        ShellHelper {
            command_completer: CommandCompleter::new(),
            path_completer: PathCompleter::new(),
            highlighter: SyntaxHighlighter::new(),
        }
    }
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !self.highlighter.enabled() {
            return Cow::Borrowed(line);
        }
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.highlighter.enabled()
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let word_start = before_cursor
            .rfind([' ', '\t'])
            .map_or(0, |i| i + 1);
        let word = &before_cursor[word_start..];
        let is_first_word = before_cursor[..word_start].trim().is_empty();

        let matches = if is_first_word {
            self.command_completer.complete_command(word)
        } else {
            self.path_completer.complete_path(word)
        };
        Ok((word_start, matches))
    }
}
