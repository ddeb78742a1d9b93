use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{Command, CommandContext, CommandError, Flow};

/// `ls` with no arguments: names in the current directory, dotfiles
/// skipped, in whatever order the directory yields them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LsCommand;

impl Command for LsCommand {
    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError> {
        let names = visible_entries(Path::new(".")).map_err(|source| CommandError::Directory {
            path: PathBuf::from("."),
            source,
        })?;
        for name in names {
            writeln!(ctx.out, "{}", name)?;
        }
        Ok(Flow::Continue)
    }
}

pub(crate) fn visible_entries(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotfiles_are_hidden() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("visible.txt"), "").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let mut names = visible_entries(dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["subdir", "visible.txt"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(visible_entries(&dir.path().join("gone")).is_err());
    }
}
