use std::{collections::BTreeSet, env, fs};

use rustyline::completion::Pair;

use crate::builtins::BUILTIN_NAMES;

/// Completes the first word of a line: builtins and anything on `PATH`.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self::default();
        completer.refresh_commands();
        completer
    }

    fn refresh_commands(&mut self) {
        self.commands.clear();
        self.commands
            .extend(BUILTIN_NAMES.iter().map(|name| name.to_string()));
        self.add_path_commands();
    }

    fn add_path_commands(&mut self) {
        let Some(path_var) = env::var_os("PATH") else {
            return;
        };
        for dir in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_candidate = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if !is_candidate {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete_command(&self, word: &str) -> Vec<Pair> {
        self.commands
            .range(word.to_string()..)
            .take_while(|cmd| cmd.starts_with(word))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_complete() {
        let completer = CommandCompleter::new();
        let names: Vec<String> = completer
            .complete_command("job")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert!(names.contains(&"jobs".to_string()));
        assert!(names.iter().all(|name| name.starts_with("job")));
    }

    #[test]
    fn test_no_match() {
        let completer = CommandCompleter::new();
        assert!(completer.complete_command("zz-lash-nothing").is_empty());
    }
}
